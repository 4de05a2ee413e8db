
mod injector_tests;
mod scanner_tests;
