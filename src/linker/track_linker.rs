//! Greedy, windowed linking of detections into particle tracks.

use crate::linker::{Detection, Gate};

/// Track membership table produced by [`TrackLinker::link`].
///
/// Indexed by detection sequence index; the value is the track id the
/// detection belongs to. Ids are issued contiguously starting at 1, in the
/// order tracks are opened. 0 is the reserved "unassigned" value and never
/// appears once linking has completed.
#[derive(Debug, Clone)]
pub struct TrackAssignments {
    ids: Vec<u32>,
    tracks_opened: u32,
}

impl TrackAssignments {
    /// Track id of the detection at `seq`.
    #[inline]
    pub fn track_id(&self, seq: usize) -> u32 {
        self.ids[seq]
    }

    /// Highest track id issued, equal to the number of tracks opened. Not
    /// the particle count: ids are consumed by tracks that later fail
    /// qualification too.
    #[inline]
    pub fn tracks_opened(&self) -> u32 {
        self.tracks_opened
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sequence indices of the members of track `track_id`, in link order
    /// (ascending, since the linker only ever scans forward).
    pub fn members(&self, track_id: u32) -> impl Iterator<Item = usize> + '_ {
        self.ids
            .iter()
            .enumerate()
            .filter(move |&(_, &id)| id == track_id)
            .map(|(seq, _)| seq)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }
}

/// Linker phases, made explicit so the terminal "ran out of points"
/// condition is a state rather than a flag threaded through loops.
#[derive(Debug, Clone, Copy)]
enum LinkerState {
    /// A new track is about to open at `cursor`.
    SeekAnchor { cursor: usize, track_id: u32 },
    /// Scanning the look-ahead window for the next member. `opened_at` is
    /// where the track's first member sits; the search for the next track
    /// resumes from there once this one closes.
    ExtendTrack {
        opened_at: usize,
        anchor: usize,
        track_id: u32,
    },
    /// No candidate in the window matched; look for the next unassigned
    /// detection at or after `resume_at`.
    TrackClosed { resume_at: usize, track_id: u32 },
    /// Every detection is assigned.
    Done { tracks_opened: u32 },
}

/// Greedy single-pass track linker.
///
/// Consumes a detection sequence sorted by non-decreasing elapsed time and
/// assigns every detection to exactly one track. Matching is strictly causal
/// and never revisited: once a detection joins a track it stays there.
///
/// The time ordering of the input is a precondition, not something the
/// linker checks; unsorted input yields undefined linking results.
#[derive(Debug, Clone)]
pub struct TrackLinker {
    gate: Gate,
}

impl TrackLinker {
    pub fn new(gate: Gate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Link the whole detection sequence, returning the membership table.
    ///
    /// An empty input produces an empty table with zero tracks; running out
    /// of unassigned detections is the normal terminal condition.
    pub fn link(&self, detections: &[Detection]) -> TrackAssignments {
        let mut ids = vec![0u32; detections.len()];
        let mut state = if detections.is_empty() {
            LinkerState::Done { tracks_opened: 0 }
        } else {
            LinkerState::SeekAnchor {
                cursor: 0,
                track_id: 1,
            }
        };

        loop {
            state = match state {
                LinkerState::SeekAnchor { cursor, track_id } => {
                    ids[cursor] = track_id;
                    LinkerState::ExtendTrack {
                        opened_at: cursor,
                        anchor: cursor,
                        track_id,
                    }
                }
                LinkerState::ExtendTrack {
                    opened_at,
                    anchor,
                    track_id,
                } => match self.find_extension(detections, &ids, anchor) {
                    Some(next) => {
                        ids[next] = track_id;
                        LinkerState::ExtendTrack {
                            opened_at,
                            anchor: next,
                            track_id,
                        }
                    }
                    None => LinkerState::TrackClosed {
                        resume_at: opened_at,
                        track_id,
                    },
                },
                LinkerState::TrackClosed {
                    resume_at,
                    track_id,
                } => match ids[resume_at..].iter().position(|&id| id == 0) {
                    Some(offset) => LinkerState::SeekAnchor {
                        cursor: resume_at + offset,
                        track_id: track_id + 1,
                    },
                    None => LinkerState::Done {
                        tracks_opened: track_id,
                    },
                },
                LinkerState::Done { tracks_opened } => {
                    return TrackAssignments { ids, tracks_opened };
                }
            };
        }
    }

    /// First unassigned detection inside the anchor's look-ahead window that
    /// passes the gate, in scan order. The scan starts at the anchor itself,
    /// which is already assigned and therefore skipped.
    fn find_extension(
        &self,
        detections: &[Detection],
        ids: &[u32],
        anchor_idx: usize,
    ) -> Option<usize> {
        let anchor = &detections[anchor_idx];
        for (i, candidate) in detections.iter().enumerate().skip(anchor_idx) {
            if !self.gate.in_window(anchor, candidate) {
                break;
            }
            if ids[i] == 0 && self.gate.accepts(anchor, candidate) {
                return Some(i);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(seq: usize, x: f64, y: f64, dia: f64, t: f64) -> Detection {
        Detection {
            seq,
            source_id: seq as i64 + 100,
            area: 1.0,
            corner_x: x,
            corner_y: y,
            diameter: dia,
            elapsed_time: t,
            center_x: x,
            center_y: y,
            abd_diameter: dia,
        }
    }

    fn linker() -> TrackLinker {
        TrackLinker::new(Gate::new(2.0, 5.0, 100.0, 0.2))
    }

    #[test]
    fn test_empty_input() {
        let assignments = linker().link(&[]);
        assert!(assignments.is_empty());
        assert_eq!(assignments.tracks_opened(), 0);
    }

    #[test]
    fn test_single_detection() {
        let dets = [det(0, 10.0, 100.0, 5.0, 0.0)];
        let assignments = linker().link(&dets);
        assert_eq!(assignments.track_id(0), 1);
        assert_eq!(assignments.tracks_opened(), 1);
    }

    #[test]
    fn test_partition_every_detection_assigned() {
        let dets: Vec<Detection> = (0..20)
            .map(|i| det(i, (i % 4) as f64 * 50.0, 100.0 + i as f64 * 5.0, 5.0, i as f64 * 0.5))
            .collect();
        let assignments = linker().link(&dets);
        assert!(assignments.as_slice().iter().all(|&id| id >= 1));
        // members over 1..=highest covers the whole set exactly once
        let total: usize = (1..=assignments.tracks_opened())
            .map(|id| assignments.members(id).count())
            .sum();
        assert_eq!(total, dets.len());
    }

    #[test]
    fn test_ids_monotonic_in_opening_position() {
        let dets: Vec<Detection> = (0..10)
            .map(|i| det(i, (i % 3) as f64 * 100.0, 100.0, 5.0, i as f64))
            .collect();
        let assignments = linker().link(&dets);
        // the first occurrence of each id appears in increasing seq order
        let mut first_seen = vec![usize::MAX; assignments.tracks_opened() as usize + 1];
        for (seq, &id) in assignments.as_slice().iter().enumerate() {
            let slot = &mut first_seen[id as usize];
            if *slot == usize::MAX {
                *slot = seq;
            }
        }
        let openings: Vec<usize> = first_seen[1..].to_vec();
        let mut sorted = openings.clone();
        sorted.sort_unstable();
        assert_eq!(openings, sorted);
    }

    #[test]
    fn test_causal_member_times() {
        let dets: Vec<Detection> = (0..12)
            .map(|i| det(i, 10.0, 100.0 + i as f64 * 8.0, 5.0, i as f64 * 0.4))
            .collect();
        let assignments = linker().link(&dets);
        for id in 1..=assignments.tracks_opened() {
            let times: Vec<f64> = assignments
                .members(id)
                .map(|seq| dets[seq].elapsed_time)
                .collect();
            assert!(times.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_no_match_gives_singleton_tracks() {
        // x positions 200px apart, far outside the 5px gate
        let dets: Vec<Detection> = (0..4)
            .map(|i| det(i, i as f64 * 200.0, 100.0, 5.0, i as f64 * 0.1))
            .collect();
        let assignments = linker().link(&dets);
        assert_eq!(assignments.tracks_opened(), 4);
        assert_eq!(assignments.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_window_restarts_at_new_anchor() {
        // Third point is outside the window of the first but inside the
        // window of the second; the restart must pick it up.
        let dets = [
            det(0, 10.0, 100.0, 5.0, 0.0),
            det(1, 10.0, 150.0, 5.0, 1.8),
            det(2, 10.0, 200.0, 5.0, 3.4),
        ];
        let assignments = linker().link(&dets);
        assert_eq!(assignments.as_slice(), &[1, 1, 1]);
    }

    #[test]
    fn test_track_search_resumes_at_opening_position() {
        // Detection 1 fails the gate against track 1 (big x offset) but
        // sits between members 0 and 2; it must open track 2 afterwards.
        let dets = [
            det(0, 10.0, 100.0, 5.0, 0.0),
            det(1, 400.0, 100.0, 5.0, 0.5),
            det(2, 10.0, 150.0, 5.0, 1.0),
        ];
        let assignments = linker().link(&dets);
        assert_eq!(assignments.as_slice(), &[1, 2, 1]);
    }

    #[test]
    fn test_greedy_takes_first_candidate_in_scan_order() {
        // Both 1 and 2 pass the gate against 0; the earlier one wins and
        // becomes the next anchor.
        let dets = [
            det(0, 10.0, 100.0, 5.0, 0.0),
            det(1, 11.0, 110.0, 5.0, 0.5),
            det(2, 12.0, 120.0, 5.0, 0.6),
        ];
        let assignments = linker().link(&dets);
        assert_eq!(assignments.as_slice(), &[1, 1, 1]);
        assert_eq!(assignments.members(1).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
