//! 具体渠道实现

pub mod dingtalk;
pub mod email;
pub mod feishu;
pub mod wecom;

pub use dingtalk::DingTalkChannel;
pub use email::EmailChannel;
pub use feishu::FeishuChannel;
pub use wecom::WecomChannel;

use serde_json::Value;

/// 判断响应体 JSON 中指定字段是否为 0。
///
/// 响应体不是合法 JSON、或字段缺失/非数值时一律视为失败。
pub(crate) fn response_code_is_zero(body: &str, field: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get(field).and_then(Value::as_i64))
        == Some(0)
}

#[cfg(test)]
pub(crate) mod testing {
    //! 渠道测试共用的传输 spy

    use std::sync::Mutex;

    use serde_json::Value;

    use crate::notification::transport::{HttpPoster, HttpResponse};

    /// 记录每次调用并返回预置响应的传输
    pub struct SpyPoster {
        pub calls: Mutex<Vec<(String, Value)>>,
        response: HttpResponse,
    }

    impl SpyPoster {
        pub fn new(status: u16, body: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response: HttpResponse {
                    status,
                    body: body.to_string(),
                },
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_call(&self) -> Option<(String, Value)> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    impl HttpPoster for SpyPoster {
        fn post_json(
            &self,
            url: &str,
            body: &Value,
            _extra_headers: &[(&str, &str)],
        ) -> HttpResponse {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            self.response.clone()
        }
    }
}
