pub mod homework;
pub mod practicum;
pub mod telegram;

#[cfg(test)]
pub mod testing;
