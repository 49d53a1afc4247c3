pub mod signature;
pub mod structural;
