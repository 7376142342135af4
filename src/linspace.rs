/// Evenly spaced samples over `[min, max]`, both ends included
pub struct Linspace {
    start: f64,
    stop: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            // Sample counts are far below 2^53, so the cast is exact
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            stop: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // Like numpy.linspace, the last sample is exactly the stop value
        if i + 1 == self.len && self.len > 1 {
            Some(self.stop)
        } else {
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    assert_eq!(Linspace::new(0., 1., 5).collect::<Vec<_>>(), vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(2., 2., 1).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);

    let samples: Vec<_> = Linspace::new(0., 1., 101).collect();
    assert_eq!(samples.len(), 101);
    assert_eq!(samples[100], 1.);
    assert!(samples.iter().all(|s| (0. ..=1.).contains(s)));
}
