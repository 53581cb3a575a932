/// Splits grid columns into `slices` disjoint interleaved sets.
///
/// Slice `i` owns every column `x` with `x % slices == i`. Escape cost is
/// spatially clustered, so interleaving spreads the expensive columns over
/// all slices instead of handing one worker a whole expensive band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    slices: usize,
}

impl Partition {
    /// `slices` is clamped to at least 1.
    pub fn new(slices: usize) -> Self {
        Self {
            slices: slices.max(1),
        }
    }

    #[inline]
    pub fn slices(&self) -> usize {
        self.slices
    }

    /// The slice that owns column `x`.
    #[inline]
    pub fn slice_of(&self, x: u32) -> usize {
        x as usize % self.slices
    }

    /// How many columns `slice` owns in a grid `width` columns wide.
    pub fn column_count(&self, slice: usize, width: u32) -> usize {
        if slice >= self.slices {
            return 0;
        }
        (width as usize + self.slices - 1 - slice) / self.slices
    }

    /// Reorder `columns` so each slice's entries form one contiguous run,
    /// slice 0 first, ascending column order within a run. Sorts in place.
    pub fn arrange<T>(&self, columns: &mut [(u32, T)]) {
        columns.sort_unstable_by_key(|&(x, _)| (self.slice_of(x), x));
    }

    /// Split arranged `columns` (one entry per grid column) into one run per
    /// slice. Slices that own no column get an empty run.
    pub fn runs<'a, T>(
        &self,
        columns: &'a mut [(u32, T)],
    ) -> impl Iterator<Item = &'a mut [(u32, T)]> + 'a
    where
        T: 'a,
    {
        let partition = *self;
        let width = columns.len() as u32;
        let mut rest = columns;
        (0..self.slices).map(move |slice| {
            let (run, tail) =
                std::mem::take(&mut rest).split_at_mut(partition.column_count(slice, width));
            rest = tail;
            run
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn runs_of(partition: Partition, width: u32) -> Vec<Vec<u32>> {
        let mut columns: Vec<(u32, ())> = (0..width).map(|x| (x, ())).collect();
        partition.arrange(&mut columns);
        partition
            .runs(&mut columns)
            .map(|run| run.iter().map(|&(x, _)| x).collect())
            .collect()
    }

    #[test]
    fn slices_cover_every_column_once() {
        for (slices, width) in [(32, 720), (7, 100), (1, 13), (50, 20)] {
            let partition = Partition::new(slices);
            let runs = runs_of(partition, width);
            assert_eq!(runs.len(), slices);

            let sets: Vec<HashSet<u32>> = runs
                .iter()
                .map(|run| run.iter().copied().collect())
                .collect();
            let union: HashSet<u32> = sets.iter().flatten().copied().collect();
            assert_eq!(union, (0..width).collect::<HashSet<_>>());

            for i in 0..slices {
                for j in i + 1..slices {
                    assert!(
                        sets[i].is_disjoint(&sets[j]),
                        "slices {i} and {j} overlap for width {width}"
                    );
                }
            }
        }
    }

    #[test]
    fn interleaving_pattern() {
        let partition = Partition::new(4);
        let runs = runs_of(partition, 14);
        assert_eq!(runs[1], vec![1, 5, 9, 13]);
        assert_eq!(runs[3], vec![3, 7, 11]);
        assert_eq!(partition.slice_of(13), 1);
    }

    #[test]
    fn runs_belong_to_a_single_slice() {
        let partition = Partition::new(3);
        for (slice, run) in runs_of(partition, 10).iter().enumerate() {
            assert_eq!(run.len(), partition.column_count(slice, 10));
            assert!(run.iter().all(|&x| partition.slice_of(x) == slice));
            assert!(run.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn arrange_carries_payloads() {
        let partition = Partition::new(3);
        let mut columns: Vec<(u32, u32)> = (0..7).map(|x| (x, x * 2)).collect();
        partition.arrange(&mut columns);
        assert_eq!(
            columns.iter().map(|&(x, _)| x).collect::<Vec<_>>(),
            vec![0, 3, 6, 1, 4, 2, 5]
        );
        assert!(columns.iter().all(|&(x, v)| v == x * 2));
    }

    #[test]
    fn slices_beyond_width_are_empty() {
        let partition = Partition::new(8);
        assert_eq!(partition.column_count(6, 4), 0);
        assert_eq!(partition.column_count(9, 4), 0);
        let runs = runs_of(partition, 4);
        assert!(runs[4..].iter().all(Vec::is_empty));
        assert_eq!(runs[3], vec![3]);
    }

    #[test]
    fn zero_slices_clamped() {
        assert_eq!(Partition::new(0).slices(), 1);
    }
}
