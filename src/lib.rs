#![forbid(unsafe_code)]

pub mod config;
pub mod datamodel;
pub mod http;
pub mod importers;
pub mod infer;
pub mod ingest;
pub mod storage;
