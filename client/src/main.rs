//! Trunk entry point for the browser bundle.

fn main() {
    #[cfg(feature = "csr")]
    client::start();
}
