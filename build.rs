fn main() {
    // ESP-IDF build plumbing is only needed when targeting the chip;
    // host-side test builds skip it.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
