//! Markup contract: the `data-*` attributes a scroll area reads and writes

/// Attribute names
pub mod attrs {
    /// Marks the role of an element inside the scroll area
    pub const PART: &str = "data-part";
    /// Visibility policy on the root
    pub const TYPE: &str = "data-type";
    /// Auto-hide delay in milliseconds on the root
    pub const HIDE_DELAY: &str = "data-scroll-hide-delay";
    /// Scrollbar axis
    pub const ORIENTATION: &str = "data-orientation";
    /// Scrollbar visibility, written by the controller
    pub const STATE: &str = "data-state";
}

/// `data-part` values
pub mod parts {
    pub const ROOT: &str = "root";
    pub const VIEWPORT: &str = "viewport";
    pub const SCROLLBAR: &str = "scrollbar";
    pub const THUMB: &str = "thumb";
}
