//! Core text conversion

pub mod latex2text;
