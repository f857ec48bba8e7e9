//! Phase state machine driving the parser
//!
//! Input is consumed strictly forward. When a line ends a phase it is handed
//! to the next phase through [`Transition::Reprocess`] instead of being pushed
//! back onto the stream.

use kacl_core::ChangelogError;
use tracing::{debug, trace};

use super::builder::ReleaseBuilder;
use super::grammar::{self, Grammar, Line};
use super::types::ParseOptions;
use crate::types::{Changelog, Link};

/// Parsing phases, in the only order they may occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Comment block preceding the title
    Header,
    /// Title line and free-form description
    Description,
    /// `##` sections
    Releases,
    /// Trailing comparison links
    Links,
}

/// Outcome of feeding one line to the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Line consumed, phase unchanged
    Stay,
    /// Line consumed, continue in a later phase
    Advance(Phase),
    /// Line not consumed, evaluate it again in a later phase
    Reprocess(Phase),
}

/// Changelog under construction
#[derive(Debug)]
pub struct Machine {
    grammar: Grammar,
    options: ParseOptions,
    phase: Phase,
    line: usize,
    in_comment: bool,
    changelog: Changelog,
    release: Option<ReleaseBuilder>,
}

impl Machine {
    pub fn new(options: ParseOptions) -> Self {
        let grammar = if options.allow_inconsistent_case {
            Grammar::ignoring_case()
        } else {
            Grammar::new()
        };

        Self {
            grammar,
            options,
            phase: Phase::Header,
            line: 0,
            in_comment: false,
            changelog: Changelog::default(),
            release: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed the next line of input, without its line terminator
    pub fn feed(&mut self, raw: &str) -> Result<(), ChangelogError> {
        self.line += 1;

        loop {
            trace!(line = self.line, phase = ?self.phase, "evaluating line");
            let transition = match self.phase {
                Phase::Header => self.header(raw)?,
                Phase::Description => self.description(raw),
                Phase::Releases => self.releases(raw)?,
                Phase::Links => self.links(raw),
            };

            match transition {
                Transition::Stay => return Ok(()),
                Transition::Advance(next) => {
                    self.advance(next);
                    return Ok(());
                }
                Transition::Reprocess(next) => self.advance(next),
            }
        }
    }

    /// Close whatever is still open at end of input
    pub fn finish(mut self) -> Result<Changelog, ChangelogError> {
        match self.phase {
            Phase::Header => return Err(ChangelogError::MissingTitle { line: self.line }),
            Phase::Description => self.finish_description(),
            Phase::Releases => self.seal_release(),
            Phase::Links => {}
        }

        debug!(
            releases = self.changelog.releases.len(),
            links = self.changelog.links.len(),
            lines = self.line,
            "changelog parsed"
        );
        Ok(self.changelog)
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(next > self.phase, "phases only move forward");

        match self.phase {
            Phase::Description => self.finish_description(),
            Phase::Releases => self.seal_release(),
            Phase::Header | Phase::Links => {}
        }

        debug!(from = ?self.phase, to = ?next, line = self.line, "phase transition");
        self.phase = next;
    }

    fn header(&mut self, raw: &str) -> Result<Transition, ChangelogError> {
        if self.in_comment || grammar::opens_comment(raw) {
            self.changelog.comment_header.push(raw.to_string());
            self.in_comment = !grammar::closes_comment(raw);
            return Ok(Transition::Stay);
        }

        match self.grammar.classify(raw) {
            Line::Blank => Ok(Transition::Stay),
            Line::Title("") => Err(ChangelogError::MissingTitle { line: self.line }),
            Line::Title(title) => {
                self.changelog.title = title.to_string();
                Ok(Transition::Advance(Phase::Description))
            }
            _ => Err(ChangelogError::MalformedHeader { line: self.line }),
        }
    }

    fn description(&mut self, raw: &str) -> Transition {
        match self.grammar.classify(raw) {
            Line::Release(_) => Transition::Reprocess(Phase::Releases),
            Line::Link { .. } => Transition::Reprocess(Phase::Links),
            _ => {
                self.changelog.description.push(raw.to_string());
                Transition::Stay
            }
        }
    }

    fn releases(&mut self, raw: &str) -> Result<Transition, ChangelogError> {
        let line = self.grammar.classify(raw);

        match line {
            Line::Blank => return Ok(Transition::Stay),
            Line::Link { .. } => return Ok(Transition::Reprocess(Phase::Links)),
            Line::Release(header) => {
                self.seal_release();
                let builder = ReleaseBuilder::from_header(&header, raw, self.line, &self.options)?;
                self.release = Some(builder);
                return Ok(Transition::Stay);
            }
            _ => {}
        }

        // This phase is only entered on a release header, so a builder is
        // always open here.
        if let Some(builder) = self.release.as_mut() {
            match line {
                Line::Category(category) => builder.enter_category(category, raw),
                _ => builder.push_entry(raw),
            }
        }
        Ok(Transition::Stay)
    }

    fn links(&mut self, raw: &str) -> Transition {
        match self.grammar.classify(raw) {
            Line::Link { version, url } => self.changelog.links.push(Link::new(version, url)),
            Line::Blank => {}
            _ => trace!(line = self.line, "ignoring non-link line after links"),
        }
        Transition::Stay
    }

    fn seal_release(&mut self) {
        if let Some(builder) = self.release.take() {
            self.changelog.releases.push(builder.build());
        }
    }

    /// Trim blank lines around the description and pick up the Keep a
    /// Changelog and SemVer versions it links to.
    fn finish_description(&mut self) {
        let description = &mut self.changelog.description;
        while description.last().is_some_and(|l| l.trim().is_empty()) {
            description.pop();
        }
        let leading = description
            .iter()
            .take_while(|l| l.trim().is_empty())
            .count();
        description.drain(..leading);

        let joined = description.join(" ");
        self.changelog.semver_version = grammar::semver_version(&joined);
        self.changelog.keep_a_changelog_version = grammar::keep_a_changelog_version(&joined);

        debug!(
            lines = description.len(),
            semver = ?self.changelog.semver_version,
            keep_a_changelog = ?self.changelog.keep_a_changelog_version,
            "description finished"
        );
    }
}
