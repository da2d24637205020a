pub mod data;
pub mod encoder;
pub mod odds;
pub mod records;

#[cfg(test)]
pub(crate) mod fixtures;
