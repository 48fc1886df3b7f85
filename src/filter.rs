use crate::dns_resolver::Resolution;

/// 判断候选子域名的解析结果是否应当上报
///
/// 没有泛解析时，只要能解析就上报。存在泛解析时，只检查基线中的第一个地址：
/// 候选结果里不包含它就上报，即使其余地址都相同，或者候选结果为空。
pub fn is_reportable(result: &Resolution, baseline: &Resolution) -> bool {
    match baseline.first() {
        None => !result.is_empty(),
        Some(wildcard_ip) => !result.contains(wildcard_ip),
    }
}
