use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};
use umya_spreadsheet::Worksheet;

const BEAN_NAME: &str = "CompetitionConfig";
const BEAN_DESC: &str = "竞赛专属配置";
const SCOPE_TAG: &str = "c;s";

const DEFAULT_BEANS_PATH: &str = "xiaojia-config/datas/__beans__.xlsx";

// __beans__ 表的固定列位，只在读写单元格时使用
const COL_BEAN_NAME: u32 = 2;
const COL_BEAN_DESC: u32 = 7;
const COL_BEAN_SCOPE: u32 = 9;
const COL_FIELD_NAME: u32 = 10;
const COL_FIELD_TYPE: u32 = 12;
const COL_FIELD_SCOPE: u32 = 13;
const COL_FIELD_COMMENT: u32 = 14;

struct FieldDef {
    name: &'static str,
    dtype: &'static str,
    scope: &'static str,
    comment: &'static str,
}

const COMPETITION_FIELDS: [FieldDef; 7] = [
    FieldDef {
        name: "max_competitor_count",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "可以参与竞赛的人数上限",
    },
    FieldDef {
        name: "prize_random_count",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "随机抽取奖励数量",
    },
    FieldDef {
        name: "prize_fixed_count",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "固定展示奖励数量",
    },
    FieldDef {
        name: "min_pk_score",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "抢占擂台最低分数要求",
    },
    FieldDef {
        name: "min_extra_energy",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "额外助力最低能量限制",
    },
    FieldDef {
        name: "pk_idle_timeout",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "无人抢占超时时长(秒)",
    },
    FieldDef {
        name: "settle_close_secs",
        dtype: "int",
        scope: SCOPE_TAG,
        comment: "结算自动关闭时长(秒)",
    },
];

fn datatype_to_string(cell: Option<&Data>) -> String {
    match cell {
        None => String::new(),
        Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(n)) => {
            if n.fract() == 0.0 {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        Some(Data::Int(n)) => n.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::Error(e)) => format!("{e:?}"),
        Some(Data::DateTime(f)) => f.to_string(),
        Some(other) => format!("{other:?}"),
    }
}

// 1-based 行列转 calamine 的 0-based 绝对坐标；范围外一律当空单元格
fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    datatype_to_string(range.get_value((row - 1, col - 1)))
}

fn load_beans_range(path: &Path) -> Result<(String, Range<Data>)> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("无法打开文件: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("工作簿中没有工作表"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("无法读取工作表: {sheet_name}"))?;

    Ok((sheet_name, range))
}

fn find_block_rows(range: &Range<Data>, marker: &str) -> Vec<u32> {
    let max_row = range.end().map_or(0, |(row, _)| row + 1);

    let mut rows: Vec<u32> = Vec::new();
    for row in 1..=max_row {
        if cell_text(range, row, COL_BEAN_NAME) != marker {
            continue;
        }
        // 从 bean 头所在行向下收集整块。块结束的判断：下一行字段名为空，
        // 且要么已到表尾，要么下一行出现了新的 bean 名。
        // 块中间字段名为空的行分不出边界，会被一并收进来。
        let mut curr = row;
        while curr <= max_row {
            rows.push(curr);
            if cell_text(range, curr + 1, COL_FIELD_NAME).is_empty()
                && (curr + 1 > max_row || !cell_text(range, curr + 1, COL_BEAN_NAME).is_empty())
            {
                break;
            }
            curr += 1;
        }
    }

    // 相邻的重复 bean 会被外层扫描重复标记，这里去重
    rows.sort_unstable();
    rows.dedup();
    rows
}

fn delete_rows(sheet: &mut Worksheet, rows: &[u32]) {
    // 倒序删除，避免行号随上移失效
    for &row in rows.iter().rev() {
        sheet.remove_row(&row, &1);
    }
}

fn append_competition_block(sheet: &mut Worksheet) {
    // 与上一段内容之间留一行空行
    let start_row = sheet.get_highest_row() + 2;

    sheet
        .get_cell_mut((COL_BEAN_NAME, start_row))
        .set_value(BEAN_NAME);
    sheet
        .get_cell_mut((COL_BEAN_DESC, start_row))
        .set_value(BEAN_DESC);
    sheet
        .get_cell_mut((COL_BEAN_SCOPE, start_row))
        .set_value(SCOPE_TAG);

    for (i, field) in COMPETITION_FIELDS.iter().enumerate() {
        let row = start_row + i as u32;
        sheet
            .get_cell_mut((COL_FIELD_NAME, row))
            .set_value(field.name);
        sheet
            .get_cell_mut((COL_FIELD_TYPE, row))
            .set_value(field.dtype);
        sheet
            .get_cell_mut((COL_FIELD_SCOPE, row))
            .set_value(field.scope);
        sheet
            .get_cell_mut((COL_FIELD_COMMENT, row))
            .set_value(field.comment);
    }
}

pub fn cleanup_beans(path: &Path) -> Result<usize> {
    let (sheet_name, range) = load_beans_range(path)?;
    let rows = find_block_rows(&range, BEAN_NAME);

    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("无法打开文件(写入模式): {}", path.display()))?;

    let sheet = book
        .get_sheet_by_name_mut(&sheet_name)
        .ok_or_else(|| anyhow!("找不到工作表: {sheet_name}"))?;

    delete_rows(sheet, &rows);
    append_competition_block(sheet);

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("无法保存文件: {}", path.display()))?;

    Ok(rows.len())
}

pub fn run(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<()> {
    let mut args = args.into_iter();
    let _exe = args.next();

    let path = match args.next() {
        Some(arg) => PathBuf::from(arg),
        None => {
            println!("未指定文件，使用默认路径: {DEFAULT_BEANS_PATH}");
            PathBuf::from(DEFAULT_BEANS_PATH)
        }
    };

    let deleted = cleanup_beans(&path)?;
    println!(
        "已清理 {deleted} 行旧的 {BEAN_NAME} 定义，重新写入并保存: {}",
        path.display()
    );
    Ok(())
}
