//! Scoped working copies
//!
//! Every mutation of a document happens on a private deep copy. The copy
//! either replaces the original through [`WorkingCopy::commit`] or is
//! discarded when dropped, so a failure halfway through never leaves a
//! half-edited image behind.

use crate::image::Image;
use log::debug;

/// A private deep copy of an [`Image`]
#[derive(Debug)]
pub struct WorkingCopy {
    image: Option<Image>,
    label: &'static str,
}

impl WorkingCopy {
    /// Deep-copy `source`. `label` names the operation in log output.
    pub fn acquire(source: &Image, label: &'static str) -> Self {
        debug!(
            "{}: acquired working copy of {}x{} image with {} layers",
            label,
            source.width(),
            source.height(),
            source.layers().len()
        );
        Self {
            image: Some(source.deep_copy()),
            label,
        }
    }

    pub fn image(&self) -> &Image {
        self.image.as_ref().expect("working copy used after commit")
    }

    pub fn image_mut(&mut self) -> &mut Image {
        self.image.as_mut().expect("working copy used after commit")
    }

    /// Keep the edits and hand back the edited image.
    pub fn commit(mut self) -> Image {
        debug!("{}: committed working copy", self.label);
        self.image.take().expect("working copy used after commit")
    }
}

impl Drop for WorkingCopy {
    fn drop(&mut self) {
        if self.image.take().is_some() {
            debug!("{}: discarded working copy", self.label);
        }
    }
}
