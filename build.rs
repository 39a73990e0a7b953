fn main() {
    // ESP-IDF link args are only needed when building the firmware image.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
