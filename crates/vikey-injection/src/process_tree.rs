//! Process-tree scanning for slow text-UI detection.
//!
//! A terminal emulator's bundle identifier says nothing about what runs
//! inside it; a frame-paced TUI several processes down (terminal -> shell ->
//! app) needs far gentler pacing than the terminal itself. The scanner walks
//! descendant processes looking for known slow-UI executable names.
//!
//! The walk is a pure function over a [`ProcessEnumerator`] capability so it
//! can be exercised against a synthetic process table in tests.

use crate::constants::MAX_COMPARABLE_NAME_LEN;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use sysinfo::{ProcessesToUpdate, System};

/// Platform process identifier.
pub type Pid = i32;

/// Capability to enumerate child processes and resolve executable names.
///
/// Both operations may fail softly: an empty child list or a missing name is
/// ordinary (the process exited, or enumeration is not permitted) and never
/// aborts a scan.
pub trait ProcessEnumerator: Send {
    /// Direct children of `pid`; empty on failure.
    fn children(&mut self, pid: Pid) -> Vec<Pid>;

    /// Executable name of `pid`, if resolvable.
    fn executable_name(&mut self, pid: Pid) -> Option<String>;
}

/// Truncate a resolved executable name to the comparable length the platform
/// guarantees for command names.
fn comparable_name(name: &str) -> &str {
    match name.char_indices().nth(MAX_COMPARABLE_NAME_LEN) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// Breadth-first search below `root` for a process whose executable name
/// exactly matches an entry in `names`.
///
/// Children are name-checked when their parent is visited; they are expanded
/// further only while `depth + 1 < max_depth`, so processes at the depth
/// limit still participate in matching without growing the frontier.
/// Short-circuits on the first match.
pub fn has_slow_ui_descendant(
    procs: &mut dyn ProcessEnumerator,
    root: Pid,
    max_depth: usize,
    names: &[&str],
) -> bool {
    let mut queue: VecDeque<(Pid, usize)> = VecDeque::new();
    queue.push_back((root, 0));

    while let Some((pid, depth)) = queue.pop_front() {
        for child in procs.children(pid) {
            if let Some(name) = procs.executable_name(child) {
                let name = comparable_name(&name);
                if names.iter().any(|candidate| *candidate == name) {
                    return true;
                }
            }
            if depth + 1 < max_depth {
                queue.push_back((child, depth + 1));
            }
        }
    }
    false
}

/// Reuse window for one process-table snapshot. A single BFS pass issues many
/// enumerator calls; refreshing once per pass is enough.
const SNAPSHOT_REUSE_WINDOW: Duration = Duration::from_millis(500);

/// Real enumerator backed by the system process table.
pub struct SystemProcessTree {
    system: System,
    last_refresh: Option<Instant>,
}

impl Default for SystemProcessTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProcessTree {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            last_refresh: None,
        }
    }

    fn refresh_if_stale(&mut self) {
        let stale = self
            .last_refresh
            .is_none_or(|at| at.elapsed() >= SNAPSHOT_REUSE_WINDOW);
        if stale {
            self.system.refresh_processes(ProcessesToUpdate::All, true);
            self.last_refresh = Some(Instant::now());
        }
    }
}

impl ProcessEnumerator for SystemProcessTree {
    fn children(&mut self, pid: Pid) -> Vec<Pid> {
        if pid < 0 {
            return Vec::new();
        }
        self.refresh_if_stale();
        let parent = sysinfo::Pid::from_u32(pid as u32);
        self.system
            .processes()
            .iter()
            .filter(|(_, process)| process.parent() == Some(parent))
            .map(|(child, _)| child.as_u32() as Pid)
            .collect()
    }

    fn executable_name(&mut self, pid: Pid) -> Option<String> {
        if pid < 0 {
            return None;
        }
        self.refresh_if_stale();
        self.system
            .process(sysinfo::Pid::from_u32(pid as u32))
            .map(|process| process.name().to_string_lossy().into_owned())
    }
}
