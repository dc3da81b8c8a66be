// ==========================================
// Sweet Hub - 命令行入口
// ==========================================
// 用法:
//   sweet-hub plan <recipe_id> <qty>
//   sweet-hub produce <recipe_id> <qty> [operator]
//   sweet-hub add-recipe <recipe.json>
//   sweet-hub stock
//   sweet-hub alerts
//   sweet-hub import-stock <file> [operator]
//   sweet-hub convert <qty> <from> <to>
//
// 输出: stdout 为 JSON;日志写 stderr
// 数据库: SWEET_HUB_DB_PATH 或用户数据目录
// 语言: SWEET_HUB_LOCALE (zh-CN / en)
// ==========================================

use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use sweet_hub::app::{get_default_db_path, AppState};
use sweet_hub::domain::Recipe;

const USAGE: &str = "用法: sweet-hub <plan|produce|add-recipe|stock|alerts|import-stock|convert> [参数...]";
const DEFAULT_OPERATOR: &str = "cli";

#[tokio::main]
async fn main() -> ExitCode {
    sweet_hub::logging::init();
    sweet_hub::i18n::init_from_env();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let db_path = get_default_db_path();
    tracing::debug!("使用数据库: {}", db_path);

    let state = match AppState::new(db_path).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("初始化失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&state, command, &args[1..]) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(state: &AppState, command: &str, args: &[String]) -> anyhow::Result<String> {
    match command {
        "plan" => {
            let (recipe_id, qty) = recipe_and_quantity(args)?;
            to_json(&state.manufacturing_api.plan_batch(recipe_id, qty)?)
        }
        "produce" => {
            let (recipe_id, qty) = recipe_and_quantity(args)?;
            let operator = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OPERATOR);
            to_json(&state.manufacturing_api.produce_batch(recipe_id, qty, operator)?)
        }
        "add-recipe" => {
            let path = arg(args, 0, "recipe.json")?;
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("读取配方文件失败: {}", path))?;
            let recipe: Recipe = serde_json::from_str(&raw)
                .with_context(|| format!("配方 JSON 格式错误: {}", path))?;
            state.manufacturing_api.create_recipe(&recipe)?;
            to_json(&recipe)
        }
        "stock" => to_json(&state.store_room_api.list_stock()?),
        "alerts" => to_json(&state.store_room_api.stock_alerts()?),
        "import-stock" => {
            let path = arg(args, 0, "file")?;
            let operator = args.get(1).map(String::as_str).unwrap_or(DEFAULT_OPERATOR);
            if !std::path::Path::new(path).exists() {
                bail!(sweet_hub::i18n::t_with_args("import.file_not_found", &[("path", path)]));
            }
            to_json(&state.store_room_api.import_stock_file(path, operator)?)
        }
        "convert" => {
            let qty = parse_quantity(arg(args, 0, "qty")?)?;
            let from = arg(args, 1, "from")?;
            let to = arg(args, 2, "to")?;
            let value = state.store_room_api.convert_quantity(qty, from, to)?;
            to_json(&serde_json::json!({ "quantity": value, "unit": to }))
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("缺少参数 <{}>\n{}", name, USAGE))
}

fn parse_quantity(raw: &str) -> anyhow::Result<f64> {
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("数量格式错误: {}", raw))
}

fn recipe_and_quantity(args: &[String]) -> anyhow::Result<(&str, f64)> {
    let recipe_id = arg(args, 0, "recipe_id")?;
    let qty = parse_quantity(arg(args, 1, "qty")?)?;
    Ok((recipe_id, qty))
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
