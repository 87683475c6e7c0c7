pub mod ast;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod token;

pub use codegen::{Artifacts, CodeGen};
pub use error::Error;
pub use parser::Parser;
pub use scanner::Scanner;
