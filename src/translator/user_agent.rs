use rand::{Rng, seq::SliceRandom};

const PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
    "X11; CrOS x86_64 14541.0.0",
];

/// A desktop Chrome `User-Agent` with a random platform and version.
///
/// MathSciNet turns away clients that do not look like a browser.
pub fn random_chrome() -> String {
    let mut rng = rand::thread_rng();
    let platform = PLATFORMS.choose(&mut rng).copied().unwrap_or(PLATFORMS[0]);
    let major: u32 = rng.gen_range(110..=131);
    let build: u32 = rng.gen_range(5000..=6800);
    let patch: u32 = rng.gen_range(0..=200);
    format!(
        "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.{build}.{patch} Safari/537.36"
    )
}
