// ==========================================
// Sweet Hub - 国际化 (i18n)
// ==========================================
// 使用 rust-i18n 库,词条位于 locales/*.yml
// 支持中文（回退语言）和英文
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 已提供词条的语言
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];

/// 回退语言
pub const FALLBACK_LOCALE: &str = "zh-CN";

/// 选择语言的环境变量
pub const LOCALE_ENV: &str = "SWEET_HUB_LOCALE";

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// 不支持的语言被忽略并返回 false,当前语言保持不变
pub fn set_locale(locale: &str) -> bool {
    match SUPPORTED_LOCALES.iter().find(|l| l.eq_ignore_ascii_case(locale.trim())) {
        Some(supported) => {
            rust_i18n::set_locale(supported);
            true
        }
        None => {
            tracing::warn!(locale, "不支持的语言,保持 {}", current_locale());
            false
        }
    }
}

/// 按环境变量 SWEET_HUB_LOCALE 选择语言,未设置时使用回退语言
pub fn init_from_env() {
    let requested = std::env::var(LOCALE_ENV).unwrap_or_default();
    if requested.trim().is_empty() || !set_locale(&requested) {
        rust_i18n::set_locale(FALLBACK_LOCALE);
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use sweet_hub::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）,占位符格式 %{name}
///
/// # 示例
/// ```no_run
/// use sweet_hub::i18n::t_with_args;
/// let msg = t_with_args("availability.not_in_stock", &[("name", "saffron")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |message, (name, value)| {
        message.replace(&format!("%{{{}}}", name), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // locale 为全局状态,测试默认并行执行,这里串行化
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale_accepts_supported_only() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        assert!(set_locale("en"));
        assert_eq!(current_locale(), "en");

        assert!(set_locale("ZH-cn"));
        assert_eq!(current_locale(), "zh-CN");

        assert!(!set_locale("fr"));
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        set_locale("zh-CN");
        assert_eq!(t("common.success"), "操作成功");

        set_locale("en");
        assert_eq!(t("common.success"), "Operation successful");

        set_locale(FALLBACK_LOCALE);
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        set_locale("zh-CN");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/stock.csv")]);
        assert_eq!(msg, "文件不存在: /tmp/stock.csv");

        set_locale("en");
        let msg = t_with_args(
            "availability.insufficient",
            &[
                ("name", "sugar"),
                ("required", "2"),
                ("available", "1.5"),
                ("shortfall", "0.5"),
                ("unit", "kg"),
            ],
        );
        assert_eq!(msg, "Insufficient sugar: need 2 kg, have 1.5 kg, short by 0.5 kg");

        set_locale(FALLBACK_LOCALE);
    }

    #[test]
    fn test_all_placeholders_resolved() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();

        for locale in SUPPORTED_LOCALES {
            set_locale(locale);
            let msg = t_with_args(
                "availability.incompatible_units",
                &[("name", "milk"), ("unit", "kg"), ("stock_unit", "liter")],
            );
            assert!(msg.contains("milk") && msg.contains("liter"), "{}", msg);
            assert!(!msg.contains("%{"), "{}", msg);
        }

        set_locale(FALLBACK_LOCALE);
    }
}
