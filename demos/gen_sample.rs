use anyhow::Result;

fn main() -> Result<()> {
    let mut book = umya_spreadsheet::new_file();

    let sheet = book.get_active_sheet_mut();

    // An unrelated bean so the sample looks like a real __beans__ sheet.
    sheet.get_cell_mut("B1").set_value("MailConfig");
    sheet.get_cell_mut("G1").set_value("邮件配置");
    sheet.get_cell_mut("I1").set_value("c;s");
    sheet.get_cell_mut("J1").set_value("max_mail_count");
    sheet.get_cell_mut("L1").set_value("int");
    sheet.get_cell_mut("M1").set_value("c;s");
    sheet.get_cell_mut("N1").set_value("邮箱容量上限");
    sheet.get_cell_mut("J2").set_value("mail_expire_days");
    sheet.get_cell_mut("L2").set_value("int");
    sheet.get_cell_mut("M2").set_value("c;s");
    sheet.get_cell_mut("N2").set_value("邮件过期天数");

    // A stale 5-field CompetitionConfig block for xjbeans to replace.
    sheet.get_cell_mut("B4").set_value("CompetitionConfig");
    sheet.get_cell_mut("G4").set_value("旧的竞赛配置");
    sheet.get_cell_mut("I4").set_value("c;s");
    let stale_fields = [
        "legacy_limit",
        "legacy_prize",
        "legacy_score",
        "legacy_energy",
        "legacy_timeout",
    ];
    for (i, name) in stale_fields.iter().enumerate() {
        let row = 4 + i as u32;
        sheet.get_cell_mut((10u32, row)).set_value(*name);
        sheet.get_cell_mut((12u32, row)).set_value("int");
        sheet.get_cell_mut((13u32, row)).set_value("c;s");
        sheet.get_cell_mut((14u32, row)).set_value("旧字段");
    }

    umya_spreadsheet::writer::xlsx::write(&book, "sample_beans.xlsx")?;
    println!("Wrote sample_beans.xlsx");
    Ok(())
}
