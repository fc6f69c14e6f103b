pub mod context;
pub mod conversion;
pub mod elaborate;
pub mod evaluate;
pub mod fresh;
pub mod parse;
pub mod program;
pub mod tactic;
pub mod unelaborate;
pub mod unevaluate;
pub mod unparse;
