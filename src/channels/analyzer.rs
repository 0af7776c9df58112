// src/channels/analyzer.rs

use tracing::debug;

use crate::diag::Diagnostics;
use crate::manifest::{Manifest, CHANNEL_MARKER};

/// Every channel reference in the manifest, split by side.
///
/// Both lists keep manifest order and keep repeats; the validity rule counts
/// occurrences.
#[derive(Debug, Clone, Default)]
pub struct ChannelRefs<'a> {
    pub inputs: Vec<&'a str>,
    pub outputs: Vec<&'a str>,
}

impl<'a> ChannelRefs<'a> {
    pub fn collect(manifest: &'a Manifest) -> Self {
        let mut refs = ChannelRefs::default();
        for job in manifest.jobs() {
            if let Some(token) = job.input.channel() {
                refs.inputs.push(token);
            }
            if let Some(token) = job.output.channel() {
                refs.outputs.push(token);
            }
        }
        refs
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// The set of channel tokens judged usable, in the order they were accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidChannels {
    tokens: Vec<String>,
}

impl ValidChannels {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn insert(&mut self, token: &str) {
        if !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }
}

/// A channel reference is valid when its token occurs an odd number of times
/// on the opposite side.
pub fn has_odd_counterparts(token: &str, opposite: &[&str]) -> bool {
    opposite.iter().filter(|t| **t == token).count() % 2 == 1
}

/// Judge every channel reference in `manifest`.
///
/// Jobs are walked in order, input side before output side. Each failing
/// reference produces one `Invalid pipe usage` line on `diag`.
pub fn analyze_channels(manifest: &Manifest, diag: &Diagnostics) -> ValidChannels {
    let refs = ChannelRefs::collect(manifest);
    let mut valid = ValidChannels::default();

    if refs.is_empty() {
        return valid;
    }

    for job in manifest.jobs() {
        if let Some(token) = job.input.channel() {
            judge(token, &refs.outputs, &mut valid, diag);
        }
        if let Some(token) = job.output.channel() {
            judge(token, &refs.inputs, &mut valid, diag);
        }
    }

    debug!(
        inputs = refs.inputs.len(),
        outputs = refs.outputs.len(),
        valid = valid.len(),
        "channel analysis complete"
    );
    valid
}

fn judge(token: &str, opposite: &[&str], valid: &mut ValidChannels, diag: &Diagnostics) {
    if has_odd_counterparts(token, opposite) {
        valid.insert(token);
    } else {
        debug!(channel = token, "channel reference without a matching counterpart");
        diag.line(format_args!("Invalid pipe usage \"{}\"", channel_name(token)));
    }
}

/// Channel name without its leading marker.
pub fn channel_name(token: &str) -> &str {
    token.strip_prefix(CHANNEL_MARKER).unwrap_or(token)
}
