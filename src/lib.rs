#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use jk_json::*;

pub use jk_reflect as reflect;
pub use jk_utils as utils;
