#![allow(non_snake_case)]
// Field elements encode to [u8; Self::ENCODED_LENGTH], so generic code
// that encodes carries a `where [(); Fq::ENCODED_LENGTH]:` bound
#![allow(incomplete_features)]
#![feature(generic_const_exprs)]

pub mod elliptic;
pub mod error;
pub mod fields;
pub mod protocols;
pub mod utilities;
