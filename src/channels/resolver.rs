// src/channels/resolver.rs

use tracing::{debug, trace};

use crate::channels::analyzer::ValidChannels;
use crate::manifest::{JobSpec, Manifest};

/// Manifest line numbers allowed to run, in the order they were marked.
///
/// A line can be recorded more than once; membership is all that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleLines {
    lines: Vec<usize>,
}

impl EligibleLines {
    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    /// Raw bookkeeping, duplicates included.
    pub fn as_slice(&self) -> &[usize] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn mark(&mut self, line: usize) {
        self.lines.push(line);
    }
}

/// Decide which manifest lines may run given the valid channels.
pub fn resolve_eligible(manifest: &Manifest, valid: &ValidChannels) -> EligibleLines {
    let mut eligible = EligibleLines::default();

    for line in manifest.lines() {
        let marks = eligibility_marks(&line.job, valid);
        trace!(line = line.number, marks, "line eligibility");
        for _ in 0..marks {
            eligible.mark(line.number);
        }
    }

    debug!(
        lines = manifest.len(),
        marked = eligible.lines.len(),
        "runnability resolved"
    );
    eligible
}

/// How many times `job`'s line gets marked eligible.
///
/// With two valid channels the line is marked once, or twice when input and
/// output are the same token.
fn eligibility_marks(job: &JobSpec, valid: &ValidChannels) -> usize {
    match (job.input.channel(), job.output.channel()) {
        (None, None) => 1,
        (Some(token), None) | (None, Some(token)) => usize::from(valid.contains(token)),
        (Some(input), Some(output)) if valid.contains(input) && valid.contains(output) => {
            if input == output { 2 } else { 1 }
        }
        (Some(_), Some(_)) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::channels::analyze_channels;
    use crate::manifest::parse_job;

    fn manifest(lines: &[&str]) -> Manifest {
        lines
            .iter()
            .map(|l| parse_job(&l.split(',').collect::<Vec<_>>()).unwrap())
            .collect()
    }

    fn resolve(lines: &[&str]) -> EligibleLines {
        let manifest = manifest(lines);
        let valid = analyze_channels(&manifest, &Diagnostics::new(std::io::sink()));
        resolve_eligible(&manifest, &valid)
    }

    #[test]
    fn plain_lines_are_always_eligible() {
        let eligible = resolve(&["cat,-,-", "sort,a.txt,b.txt"]);
        assert_eq!(eligible.as_slice(), &[1, 2]);
    }

    #[test]
    fn paired_channel_enables_both_ends() {
        let eligible = resolve(&["cat,-,@p", "wc,@p,-"]);
        assert_eq!(eligible.as_slice(), &[1, 2]);
    }

    #[test]
    fn unpaired_channel_blocks_its_line() {
        let eligible = resolve(&["cat,-,@lonely", "true,-,-"]);
        assert_eq!(eligible.as_slice(), &[2]);
    }

    #[test]
    fn two_valid_channels_make_the_line_eligible() {
        let eligible = resolve(&["cat,-,@a", "tr,@a,@b,0,a-z,A-Z", "wc,@b,-"]);
        assert!(eligible.contains(1));
        assert!(eligible.contains(2));
        assert!(eligible.contains(3));
    }

    #[test]
    fn self_looped_channel_is_marked_twice() {
        let eligible = resolve(&["cat,@loop,@loop"]);
        assert_eq!(eligible.as_slice(), &[1, 1]);
    }

    #[test]
    fn one_invalid_of_two_channels_blocks_the_line() {
        let eligible = resolve(&["cat,-,@a", "tr,@a,@b"]);
        assert!(eligible.contains(1));
        assert!(!eligible.contains(2));
    }
}
