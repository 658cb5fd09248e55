mod common;
mod experts;
mod export;
