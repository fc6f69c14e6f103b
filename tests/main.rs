mod common;
mod examples;
mod fail;
