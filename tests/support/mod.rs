#![allow(dead_code)]

pub mod board;
