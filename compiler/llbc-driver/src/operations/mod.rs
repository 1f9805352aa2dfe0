pub mod decode;
pub mod emit_ron;
pub mod emit_text;
