#![doc = include_str!("../README.md")]

mod base62;
mod error;
mod id;
mod ms;
mod rand;
mod random_native;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::ms::*;
pub use crate::rand::*;
pub use crate::random_native::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
