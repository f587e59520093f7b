use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::classes::ClassRegistry;
use crate::error::{Error, Result};
use crate::pairing::is_rendered_output;
use crate::render::render_label_file;
use crate::scan::list_files_with_suffix;

/// Suffix of label files.
pub const LABEL_SUFFIX: &str = "txt";

/// Settings for one batch run over a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Directory holding labels and images; outputs are written here too.
    pub dir: PathBuf,
    /// Image file suffix without the dot, e.g. `jpg`.
    pub image_suffix: String,
    /// Class name file, resolved relative to the process working directory.
    pub class_config: PathBuf,
    /// Width and height of the normalized coordinate space, when not taken from the image.
    pub dimension_override: (Option<u32>, Option<u32>),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            image_suffix: "jpg".to_string(),
            class_config: PathBuf::from("classes.txt"),
            dimension_override: (None, None),
        }
    }
}

/// What happened to each label file of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// `(image, output)` pairs that were drawn.
    pub rendered: Vec<(PathBuf, PathBuf)>,
    /// Label files without a loadable image.
    pub orphans: Vec<PathBuf>,
    /// Label files skipped because a line could not be parsed.
    pub malformed: Vec<PathBuf>,
    /// Images that no label file points at.
    pub unlabeled_images: Vec<PathBuf>,
}

impl RunSummary {
    /// Prints the orphan count and list, and skipped label files if any.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Amount of orphaned labels: {}", self.orphans.len())?;
        writeln!(out, "{:?}", display_names(&self.orphans))?;
        if !self.malformed.is_empty() {
            writeln!(
                out,
                "Skipped {} malformed label file(s): {:?}",
                self.malformed.len(),
                display_names(&self.malformed)
            )?;
        }
        Ok(())
    }
}

fn display_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            path.file_name()
                .unwrap_or(path.as_os_str())
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

/// Runs [`run_with_output`] with progress on standard output.
pub fn run(config: &RenderConfig) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Draws the boxes of every label file in `config.dir`, in file name order.
///
/// Label files whose image is missing are recorded as orphans and label files
/// with an unparsable line are skipped; both are reported in the returned
/// summary. Any other error aborts the run.
pub fn run_with_output<W: Write>(config: &RenderConfig, out: &mut W) -> Result<RunSummary> {
    let classes = ClassRegistry::load(&config.class_config)?;
    let image_suffix = config.image_suffix.trim_start_matches('.');

    let class_config = fs::canonicalize(&config.class_config).ok();
    let labels: Vec<PathBuf> = list_files_with_suffix(&config.dir, LABEL_SUFFIX)?
        .into_iter()
        .filter(|label| !is_same_file(label, class_config.as_deref()))
        .collect();
    let images: Vec<PathBuf> = list_files_with_suffix(&config.dir, image_suffix)?
        .into_iter()
        .filter(|image| !is_rendered_output(image))
        .collect();
    info!(
        "{} label file(s) and {} image(s) in {}",
        labels.len(),
        images.len(),
        config.dir.display()
    );

    let mut summary = RunSummary::default();
    for label in &labels {
        match render_label_file(label, image_suffix, &classes, config.dimension_override) {
            Ok(rendered) => {
                writeln!(
                    out,
                    "Drawing boxes for image: {} into {}",
                    rendered.image.display(),
                    rendered.output.display()
                )
                .map_err(|e| Error::io("<stdout>", e))?;
                summary.rendered.push((rendered.image, rendered.output));
            }
            Err(Error::MissingImage { image, source, .. }) => {
                debug!("{}: {source}", image.display());
                writeln!(
                    out,
                    "Couldn't find image in {} for label: {}",
                    config.dir.display(),
                    label.display()
                )
                .map_err(|e| Error::io("<stdout>", e))?;
                summary.orphans.push(label.clone());
            }
            Err(err @ Error::MalformedLabelLine { .. }) => {
                warn!("{err}");
                writeln!(out, "Skipping malformed label file: {}", label.display())
                    .map_err(|e| Error::io("<stdout>", e))?;
                summary.malformed.push(label.clone());
            }
            Err(err) => return Err(err),
        }
    }

    let label_stems: BTreeSet<_> = labels.iter().filter_map(|l| l.file_stem()).collect();
    summary.unlabeled_images = images
        .into_iter()
        .filter(|image| image.file_stem().is_none_or(|stem| !label_stems.contains(stem)))
        .collect();
    if !summary.unlabeled_images.is_empty() {
        debug!(
            "{} image(s) without a label file: {:?}",
            summary.unlabeled_images.len(),
            display_names(&summary.unlabeled_images)
        );
    }

    summary
        .report(out)
        .map_err(|e| Error::io("<stdout>", e))?;
    Ok(summary)
}

fn is_same_file(path: &Path, canonical: Option<&Path>) -> bool {
    canonical.is_some_and(|canonical| {
        fs::canonicalize(path).is_ok_and(|resolved| resolved == canonical)
    })
}
