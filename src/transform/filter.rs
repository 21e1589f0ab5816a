/// 路由绑定了任一被忽略的入口点时返回 true
///
/// 忽略列表为空时不过滤；路由没有入口点时也不会被过滤。
/// 只对普通模式的下游生效，直通模式文档原样合并。
pub fn should_ignore(entry_points: &[String], ignore: &[String]) -> bool {
    if ignore.is_empty() {
        return false;
    }

    entry_points.iter().any(|ep| ignore.contains(ep))
}
