use log::info;
use std::path::Path;
use std::process::Command;

/// Opens a rendered picture or animation with the default viewer of the platform.
pub fn show_image(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("'{}' not found", path.display()).into());
    }
    info!("opening '{}'", path.display());
    open_with_default_viewer(path)
}

fn open_with_default_viewer(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_os = "windows")]
    {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("path '{}' is not valid unicode", path.display()))?;
        Command::new("cmd")
            .args(["/C", "start", "", path_str])
            .spawn()?;
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        log::warn!("no default viewer known for this platform");
    }

    Ok(())
}
