pub mod bits;
pub mod hex;
pub mod securemem;

#[cfg(test)]
pub mod arbitrary;
