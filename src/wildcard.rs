use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dns_resolver::{Resolution, Resolve};

/// 探测标签的长度
pub const PROBE_LABEL_LEN: usize = 32;

const PROBE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 泛解析探测
///
/// 解析一个几乎不可能存在的随机子域名，返回的结果就是该域名的泛解析基线。
/// 空基线表示没有泛解析。
pub async fn probe<R: Resolve + ?Sized>(resolver: &R, domain: &str) -> Resolution {
    let test_domain = format!("{}.{}", random_label(PROBE_LABEL_LEN), domain);
    resolver.resolve(&test_domain).await
}

/// 生成随机标签，每次调用都以当前时间重新播种
pub fn random_label(len: usize) -> String {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| PROBE_CHARSET[rng.gen_range(0..PROBE_CHARSET.len())] as char)
        .collect()
}
