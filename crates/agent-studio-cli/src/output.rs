use std::io::Write;
use std::path::{Path, PathBuf};

use agent_studio_core::{GenerationResult, ImageDataUri};
use anyhow::{Context, Result};

/// Where and how results are emitted.
pub struct OutputOptions {
    pub out_dir: PathBuf,
    pub print_data_uri: bool,
}

/// Prints text results to `out`; writes images under `out_dir` (or prints
/// their data URIs) and reports each written path on `out`.
pub fn emit(
    result: &GenerationResult,
    options: &OutputOptions,
    out: &mut dyn Write,
) -> Result<Vec<PathBuf>> {
    match result {
        GenerationResult::Text(text) => {
            writeln!(out, "{text}")?;
            Ok(Vec::new())
        }
        GenerationResult::Image(image) => {
            emit_images(std::slice::from_ref(image), "image", false, options, out)
        }
        GenerationResult::Storyboard(images) => emit_images(images, "scene", true, options, out),
    }
}

fn emit_images(
    images: &[ImageDataUri],
    stem: &str,
    numbered: bool,
    options: &OutputOptions,
    out: &mut dyn Write,
) -> Result<Vec<PathBuf>> {
    if options.print_data_uri {
        for image in images {
            writeln!(out, "{image}")?;
        }
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("creating {}", options.out_dir.display()))?;
    let mut written = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let name = if numbered {
            format!("{stem}-{:02}.{}", index + 1, extension(image.mime_type()))
        } else {
            format!("{stem}.{}", extension(image.mime_type()))
        };
        let path = options.out_dir.join(name);
        write_image(image, &path)?;
        writeln!(out, "{}", path.display())?;
        written.push(path);
    }
    Ok(written)
}

fn write_image(image: &ImageDataUri, path: &Path) -> Result<()> {
    let bytes = image
        .decode()
        .with_context(|| format!("decoding image for {}", path.display()))?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn extension(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}
