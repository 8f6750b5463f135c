mod catalog;
mod compare;
mod history;
