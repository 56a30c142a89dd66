//! Descriptive statistics over sample windows. Every function returns 0 for
//! input too small to define the value.

pub fn sum(values: &[f32]) -> f32 {
    values.iter().sum()
}

pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f32
}

fn sorted(values: &[f32]) -> Vec<f32> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

fn median_of_sorted(v: &[f32]) -> f32 {
    match v.len() {
        0 => 0.0,
        n if n % 2 == 0 => (v[n / 2 - 1] + v[n / 2]) / 2.0,
        n => v[n / 2],
    }
}

/// Middle value; the mean of the two middle values for even lengths.
pub fn median(values: &[f32]) -> f32 {
    median_of_sorted(&sorted(values))
}

/// Population variance.
pub fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / values.len() as f32
}

pub fn std_dev(values: &[f32]) -> f32 {
    variance(values).sqrt()
}

/// `3 * (mean - median) / variance`.
pub fn skewness(values: &[f32]) -> f32 {
    let var = variance(values);
    if var <= 0.0 {
        return 0.0;
    }
    3.0 * (mean(values) - median(values)) / var
}

/// Sample excess kurtosis. Needs at least four values.
pub fn kurtosis(values: &[f32]) -> f32 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let m = mean(values);
    let (mut s2, mut s4) = (0.0f32, 0.0f32);
    for v in values {
        let d2 = (v - m) * (v - m);
        s2 += d2;
        s4 += d2 * d2;
    }
    if s2 <= 0.0 {
        return 0.0;
    }

    let n = n as f32;
    let scale = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let m2 = s2 / n;
    scale * s4 / (m2 * m2) - 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// First and third quartile, as medians of the lower and upper halves.
pub fn quartiles(values: &[f32]) -> (f32, f32) {
    let v = sorted(values);
    let n = v.len();
    if n < 2 {
        let only = v.first().copied().unwrap_or(0.0);
        return (only, only);
    }
    (median_of_sorted(&v[..n / 2]), median_of_sorted(&v[(n + 1) / 2..]))
}

/// Count of values outside `[q1 - 1.5 IQR, q3 + 1.5 IQR]`.
pub fn outliers(values: &[f32]) -> usize {
    if values.len() < 4 {
        return 0;
    }
    let (q1, q3) = quartiles(values);
    let iqr = q3 - q1;
    let (low, high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
    values.iter().filter(|&&v| v < low || v > high).count()
}

/// Population covariance over the paired prefix of `a` and `b`.
pub fn covariance(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (ma, mb) = (mean(a), mean(b));
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f32>()
        / n as f32
}

/// Pearson correlation, or 0 when either side has no spread.
pub fn correlation(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let (sa, sb) = (std_dev(&a[..n]), std_dev(&b[..n]));
    if sa == 0.0 || sb == 0.0 {
        return 0.0;
    }
    covariance(a, b) / (sa * sb)
}
