pub mod components;
pub mod implementation;

#[cfg(test)]
pub(crate) mod testserver;
