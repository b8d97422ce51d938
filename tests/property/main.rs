// tests/property/main.rs

mod lexer;
