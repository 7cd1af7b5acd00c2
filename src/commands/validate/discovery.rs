use super::*;

/// Markdown sheets directly inside `sheets_dir`, sorted by path.
pub fn discover_sheets(sheets_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sheets = Vec::new();

    let entries = fs::read_dir(sheets_dir)
        .with_context(|| format!("failed to read sheets directory {}", sheets_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", sheets_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_sheet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("md"))
            .unwrap_or(false);

        if is_sheet {
            sheets.push(path);
        }
    }

    sheets.sort();
    Ok(sheets)
}

pub fn resolve_sheets(args: &ValidateArgs) -> Result<Vec<PathBuf>> {
    if !args.sheets.is_empty() {
        return Ok(args.sheets.clone());
    }

    let sheets = discover_sheets(&args.sheets_dir)?;
    if sheets.is_empty() {
        bail!("no character sheets found in {}", args.sheets_dir.display());
    }
    Ok(sheets)
}
