mod clear;
mod expect;
mod headers;
mod send;
