/// 由服务端返回的相对路径拼接附件下载地址
pub fn attachment_link(origin: &str, relative_path: &str) -> String {
    let path = relative_path.replace('\\', "/");
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
