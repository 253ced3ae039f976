// Library API for the word-puzzle engines
pub mod anagram;
pub mod bindings;
pub mod budget;
pub mod errors;
pub mod letters;
pub mod log;
pub mod pattern;
pub mod probability;
pub mod solver;
pub mod word_list;
