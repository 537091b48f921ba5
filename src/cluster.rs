use std::collections::HashMap;

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;
use tracing::{debug, trace};
use unordered_pair::UnorderedPair;

use crate::color::Rgb;
use crate::error::ColorParsingError;
use crate::face::Face;
use crate::metric::{delta_e00, delta_e00_channels};
use crate::palette::ColorLabel;

/// A sampled sticker color, tagged with where it was sampled.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ColorSample {
    /// Face the sample was taken from.
    pub face: Face,
    /// Row-major index of the sticker within its face.
    pub slot: usize,
    /// The sampled color.
    pub rgb: Rgb,
}

impl ColorSample {
    /// Tag a flat scan delivered face by face in [`Face::SCAN_ORDER`], each face row by row.
    ///
    /// Fails if the scan length is not `6 * k * k` for some `k` in `2..=ColorClusterer::MAX_SIDE`.
    pub fn from_scan(colors: &[Rgb]) -> Result<Vec<ColorSample>, ColorParsingError> {
        let per_face = samples_per_face(colors.len())?;

        Ok(colors.iter()
            .enumerate()
            .map(|(i, &rgb)| ColorSample { face: Face::SCAN_ORDER[i / per_face], slot: i % per_face, rgb })
            .collect_vec())
    }
}

/// Number of stickers per face for a scan of `total` samples, i.e. `k * k`.
pub(crate) fn samples_per_face(total: usize) -> Result<usize, ColorParsingError> {
    if total % 6 != 0 {
        return Err(ColorParsingError::SampleCount(total));
    }

    let per_face = total / 6;
    let side = per_face.isqrt();
    // a group is seeded with a pair, so a face needs at least two stickers
    if !(2..=ColorClusterer::MAX_SIDE).contains(&side) || side * side != per_face {
        return Err(ColorParsingError::SampleCount(total));
    }

    Ok(per_face)
}

#[derive(Copy, Clone, Debug)]
enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

/// Samples believed to share one physical sticker color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGroup {
    /// Sticker class assigned by the labeling heuristics.
    pub label: ColorLabel,
    /// Members in the order they joined the group.
    pub samples: Vec<ColorSample>,
}

fn raw_mean(samples: &[ColorSample], channel: Channel) -> f64 {
    let sum: f64 = samples.iter().map(|s| s.rgb.channels()[channel as usize]).sum();
    sum / samples.len() as f64
}

// root of the mean of squares, per channel
fn quadratic_mean(samples: &[ColorSample]) -> [f64; 3] {
    let mut sums = [0.0; 3];
    for sample in samples {
        for (sum, c) in sums.iter_mut().zip(sample.rgb.channels()) {
            *sum += c * c;
        }
    }

    sums.map(|sum| (sum / samples.len() as f64).sqrt())
}

/// Mapping from every sampled color to its sticker class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanonicalColorMap(HashMap<Rgb, ColorLabel>);

impl CanonicalColorMap {
    /// Collect the labels of clustered groups.
    ///
    /// Identical colors landing in differently labeled groups make the map ambiguous and are
    /// rejected.
    pub fn from_groups(groups: &[ColorGroup]) -> Result<Self, ColorParsingError> {
        let mut map = HashMap::new();
        for group in groups {
            for sample in &group.samples {
                match map.insert(sample.rgb, group.label) {
                    Some(previous) if previous != group.label => {
                        return Err(ColorParsingError::AmbiguousSample { rgb: sample.rgb, first: previous, second: group.label });
                    }
                    _ => {}
                }
            }
        }

        Ok(Self(map))
    }

    /// The class of a sampled color, if it was part of the scan.
    pub fn get(&self, rgb: &Rgb) -> Option<ColorLabel> {
        self.0.get(rgb).copied()
    }

    /// Number of distinct sampled colors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no colors were mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every sampled color with its class, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rgb, &ColorLabel)> {
        self.0.iter()
    }
}

/// Greedy nearest-neighbor grouping of a complete scan into six color classes.
///
/// Construction computes every pairwise CIEDE2000 distance once. [`Self::cluster`] then grows six
/// groups one at a time: each is seeded with the closest pair of unselected samples and grows by
/// the unselected sample nearest to any current member until it holds `k * k` samples. Groups are
/// finally labeled by channel heuristics:
///
/// 1. the two groups with the least red are blue and green, told apart by which is nearer pure blue
/// 2. of the rest, the group with the least green is red, then the next is orange
/// 3. of the last two, the group with less blue is yellow and the other is white
///
/// The grouping is deterministic but greedy. Ties are broken towards the lowest sample index.
/// Scans are limited to faces of at most [`Self::MAX_SIDE`] stickers a side; [`ScanSession`](crate::ScanSession)
/// further rejects anything but 2x2 and 3x3 before clustering starts.
#[derive(Clone, Debug)]
pub struct ColorClusterer {
    samples: Vec<ColorSample>,
    distances: Array2<f64>,
    group_size: usize,
}

impl ColorClusterer {
    /// Largest face side a scan may have. Clustering keeps a dense `n * n` distance matrix, so this
    /// bounds it at a few hundred samples.
    pub const MAX_SIDE: usize = 7;

    /// Precompute pairwise distances for a full scan of `6 * k * k` samples.
    pub fn new(samples: Vec<ColorSample>) -> Result<Self, ColorParsingError> {
        let group_size = samples_per_face(samples.len())?;

        let n = samples.len();
        let labs = samples.iter().map(|s| s.rgb.to_lab()).collect_vec();
        let mut distances = Array2::zeros((n, n));
        for (i, j) in (0..n).tuple_combinations() {
            let delta = delta_e00(&labs[i], &labs[j]);
            distances[(i, j)] = delta;
            distances[(j, i)] = delta;
        }

        Ok(Self { samples, distances, group_size })
    }

    /// Shorthand for tagging a flat scan and clustering it.
    pub fn from_scan(colors: &[Rgb]) -> Result<Self, ColorParsingError> {
        Self::new(ColorSample::from_scan(colors)?)
    }

    #[inline]
    fn distance(&self, pair: UnorderedPair<usize>) -> f64 {
        self.distances[(pair.0, pair.1)]
    }

    fn closest_free_pair(&self, selected: &[bool]) -> Option<UnorderedPair<usize>> {
        let mut best = None;
        let mut min_distance = f64::INFINITY;
        for (i, j) in (0..self.samples.len()).tuple_combinations() {
            if selected[i] || selected[j] {
                continue;
            }

            let pair = UnorderedPair(i, j);
            let distance = self.distance(pair);
            if distance < min_distance {
                min_distance = distance;
                best = Some(pair);
            }
        }

        best
    }

    fn nearest_free_neighbor(&self, group: &[usize], selected: &[bool]) -> Option<usize> {
        let mut best = None;
        let mut min_distance = f64::INFINITY;
        for &member in group {
            for candidate in (0..self.samples.len()).filter(|&t| t != member && !selected[t]) {
                let distance = self.distance(UnorderedPair(member, candidate));
                if distance < min_distance {
                    min_distance = distance;
                    best = Some(candidate);
                }
            }
        }

        best
    }

    /// Partition sample indices into six groups of `k * k`, in the order the groups were closed.
    pub(crate) fn group_indices(&self) -> Vec<Vec<usize>> {
        let mut selected = vec![false; self.samples.len()];
        let mut groups = Vec::with_capacity(6);
        let mut current: Vec<usize> = Vec::with_capacity(self.group_size);

        while groups.len() < 6 {
            if current.is_empty() {
                // every sample is placed once the sixth group closes, so a free pair exists here
                let Some(pair) = self.closest_free_pair(&selected) else { break };
                selected[pair.0] = true;
                selected[pair.1] = true;
                current.extend([pair.0, pair.1]);
            } else {
                let Some(next) = self.nearest_free_neighbor(&current, &selected) else { break };
                selected[next] = true;
                current.push(next);
            }

            if current.len() == self.group_size {
                trace!(group = groups.len(), "closed color group");
                groups.push(std::mem::take(&mut current));
            }
        }

        groups
    }

    /// Group and label every sample.
    pub fn cluster(&self) -> Vec<ColorGroup> {
        let mut remaining = self.group_indices()
            .into_iter()
            .map(|group| group.into_iter().map(|i| self.samples[i]).collect_vec())
            .collect_vec();

        // pops the first group with the smallest mean of `channel`
        let take_min = |groups: &mut Vec<Vec<ColorSample>>, channel: Channel| {
            let mut index = 0;
            let mut min = f64::INFINITY;
            for (i, group) in groups.iter().enumerate() {
                let mean = raw_mean(group, channel);
                if mean < min {
                    min = mean;
                    index = i;
                }
            }
            groups.remove(index)
        };

        let candidate_1 = take_min(&mut remaining, Channel::Red);
        let candidate_2 = take_min(&mut remaining, Channel::Red);

        let delta_1 = delta_e00_channels(quadratic_mean(&candidate_1), Rgb::PURE_BLUE);
        let delta_2 = delta_e00_channels(quadratic_mean(&candidate_2), Rgb::PURE_BLUE);
        debug!(delta_1, delta_2, "blue and green candidates against pure blue");

        let (blue, green) = if delta_1 < delta_2 { (candidate_1, candidate_2) } else { (candidate_2, candidate_1) };

        let red = take_min(&mut remaining, Channel::Green);
        let orange = take_min(&mut remaining, Channel::Green);
        let yellow = take_min(&mut remaining, Channel::Blue);
        let white = remaining.pop().unwrap_or_default();

        ColorLabel::VARIANTS.iter()
            .zip([red, orange, yellow, green, blue, white])
            .map(|(&label, samples)| ColorGroup { label, samples })
            .collect()
    }

    /// Cluster and collapse the result into a color map.
    pub fn resolve(&self) -> Result<CanonicalColorMap, ColorParsingError> {
        CanonicalColorMap::from_groups(&self.cluster())
    }

    /// The samples in scan order.
    pub fn samples(&self) -> &[ColorSample] {
        &self.samples
    }
}
