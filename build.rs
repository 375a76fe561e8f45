//! Build script for FWMS
//!
//! Embeds build-time information (git commit, dirty status, build timestamp)
//! so `fwms --version` can report exactly what was shipped.

fn main() {
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}
