mod command;
mod dice;
mod texts;
