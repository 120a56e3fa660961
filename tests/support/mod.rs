#![allow(dead_code)]

pub mod artifacts;
