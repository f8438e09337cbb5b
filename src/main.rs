#[cfg(not(target_os = "android"))]
fn main() -> anyhow::Result<()>
{
        surface_bridge::run()
}

// The activity enters through `android_main` in the library.
#[cfg(target_os = "android")]
fn main() {}
