pub struct Config {
    /// Suppresses decorative output.
    ///
    /// `1` hides banners and headers, `2` also hides per-entry trees.
    pub quiet: u8,
    pub no_banner: bool,
}
