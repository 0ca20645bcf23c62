use std::string::FromUtf8Error;

/// C string buffer filled by an OpenCL info query to String, stops at the first 0
pub fn buf_u8_to_string(buf: &[u8]) -> Result<String, FromUtf8Error> {
    let end = buf.iter().position(|&x| x == 0).unwrap_or(buf.len());

    String::from_utf8(buf[..end].to_vec())
}

/// remove trailing whitespace and line breaks of a log returned by the driver
pub fn trim_driver_log(log: &str) -> &str {
    log.trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
}
