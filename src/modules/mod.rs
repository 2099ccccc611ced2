pub mod headerscan;
