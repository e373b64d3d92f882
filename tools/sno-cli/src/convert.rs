use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use acr::ActorDocument;
use gam::{
    AffixListFile, CharactersFile, CurrencyFile, EnchantCostScalarsFile, ExperienceTableAltFile,
    ExperienceTableFile, GamTable, HandicapLevelsFile, HirelingsFile, ItemSalvageLevelsFile,
    ItemTypesFile, ItemsFile, LabelGbidsFile, LegacyItemConversionsFile, MonsterAffixesFile,
    MonsterLevelsFile, MonsterNamesFile, ParagonBonusesFile, PowerFormulaTablesFile,
    RareItemNamesFile, RecipesFile, SetItemBonusesFile, TableKind, TieredLootRunLevelsFile,
    TransmuteRecipesFile,
};
use layout::LayoutOptions;
use log::info;
use miette::{Diagnostic, IntoDiagnostic, Result};
use mon::{LayoutReport, MonsterDocument};
use qst::QuestDocument;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("cannot convert {} to {}", input.display(), output.display())]
    #[diagnostic(
        code(sno_cli::unsupported),
        help("supported: .gam/.mon/.acr/.qst -> .json and .json -> .gam/.mon/.qst")
    )]
    Unsupported { input: PathBuf, output: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Gam,
    Mon,
    Acr,
    Qst,
    Json,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "gam" => Some(Self::Gam),
            "mon" => Some(Self::Mon),
            "acr" => Some(Self::Acr),
            "qst" => Some(Self::Qst),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Converts `input` into `output` and returns a one-line summary.
pub fn run(input: &Path, output: &Path, options: &LayoutOptions) -> Result<String> {
    info!("{} -> {}", input.display(), output.display());
    match (Format::of(input), Format::of(output)) {
        (Some(Format::Gam), Some(Format::Json)) => gam_to_json(input, output),
        (Some(Format::Json), Some(Format::Gam)) => json_to_gam(input, output),
        (Some(Format::Mon), Some(Format::Json)) => mon_to_json(input, output, options),
        (Some(Format::Json), Some(Format::Mon)) => json_to_mon(input, output, options),
        (Some(Format::Acr), Some(Format::Json)) => acr_to_json(input, output),
        (Some(Format::Qst), Some(Format::Json)) => qst_to_json(input, output),
        (Some(Format::Json), Some(Format::Qst)) => json_to_qst(input, output),
        _ => Err(CliError::Unsupported {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }
        .into()),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).into_diagnostic()?;
    serde_json::from_reader(BufReader::new(file)).into_diagnostic()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).into_diagnostic()?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).into_diagnostic()?;
    writer.flush().into_diagnostic()
}

fn table_to_json<T: GamTable>(image: &[u8], output: &Path) -> Result<String> {
    let table = T::read(image)?;
    write_json(output, &table)?;
    Ok(format!("{} -> {} records", T::KIND, table.record_count()))
}

fn json_to_table<T: GamTable>(input: &Path, output: &Path) -> Result<String> {
    let table: T = read_json(input)?;
    std::fs::write(output, table.write()?).into_diagnostic()?;
    Ok(format!("{} -> {} records", T::KIND, table.record_count()))
}

/// The table is named by the binary side of the conversion.
fn gam_to_json(input: &Path, output: &Path) -> Result<String> {
    let kind = TableKind::detect(&file_name(input))?;
    let image = std::fs::read(input).into_diagnostic()?;
    match kind {
        TableKind::ExperienceTable => table_to_json::<ExperienceTableFile>(&image, output),
        TableKind::ExperienceTableAlt => table_to_json::<ExperienceTableAltFile>(&image, output),
        TableKind::Characters => table_to_json::<CharactersFile>(&image, output),
        TableKind::AffixList => table_to_json::<AffixListFile>(&image, output),
        TableKind::Items => table_to_json::<ItemsFile>(&image, output),
        TableKind::ItemTypes => table_to_json::<ItemTypesFile>(&image, output),
        TableKind::ItemSalvageLevels => table_to_json::<ItemSalvageLevelsFile>(&image, output),
        TableKind::Currency => table_to_json::<CurrencyFile>(&image, output),
        TableKind::HandicapLevels => table_to_json::<HandicapLevelsFile>(&image, output),
        TableKind::Hirelings => table_to_json::<HirelingsFile>(&image, output),
        TableKind::LabelGbids => table_to_json::<LabelGbidsFile>(&image, output),
        TableKind::MonsterAffixes => table_to_json::<MonsterAffixesFile>(&image, output),
        TableKind::MonsterLevels => table_to_json::<MonsterLevelsFile>(&image, output),
        TableKind::MonsterNames => table_to_json::<MonsterNamesFile>(&image, output),
        TableKind::ParagonBonuses => table_to_json::<ParagonBonusesFile>(&image, output),
        TableKind::PowerFormulaTables => table_to_json::<PowerFormulaTablesFile>(&image, output),
        TableKind::RareItemNames => table_to_json::<RareItemNamesFile>(&image, output),
        TableKind::TransmuteRecipes => table_to_json::<TransmuteRecipesFile>(&image, output),
        TableKind::Recipes => table_to_json::<RecipesFile>(&image, output),
        TableKind::SetItemBonuses => table_to_json::<SetItemBonusesFile>(&image, output),
        TableKind::EnchantCostScalars => table_to_json::<EnchantCostScalarsFile>(&image, output),
        TableKind::LegacyItemConversions => table_to_json::<LegacyItemConversionsFile>(&image, output),
        TableKind::TieredLootRunLevels => table_to_json::<TieredLootRunLevelsFile>(&image, output),
    }
}

fn json_to_gam(input: &Path, output: &Path) -> Result<String> {
    match TableKind::detect(&file_name(output))? {
        TableKind::ExperienceTable => json_to_table::<ExperienceTableFile>(input, output),
        TableKind::ExperienceTableAlt => json_to_table::<ExperienceTableAltFile>(input, output),
        TableKind::Characters => json_to_table::<CharactersFile>(input, output),
        TableKind::AffixList => json_to_table::<AffixListFile>(input, output),
        TableKind::Items => json_to_table::<ItemsFile>(input, output),
        TableKind::ItemTypes => json_to_table::<ItemTypesFile>(input, output),
        TableKind::ItemSalvageLevels => json_to_table::<ItemSalvageLevelsFile>(input, output),
        TableKind::Currency => json_to_table::<CurrencyFile>(input, output),
        TableKind::HandicapLevels => json_to_table::<HandicapLevelsFile>(input, output),
        TableKind::Hirelings => json_to_table::<HirelingsFile>(input, output),
        TableKind::LabelGbids => json_to_table::<LabelGbidsFile>(input, output),
        TableKind::MonsterAffixes => json_to_table::<MonsterAffixesFile>(input, output),
        TableKind::MonsterLevels => json_to_table::<MonsterLevelsFile>(input, output),
        TableKind::MonsterNames => json_to_table::<MonsterNamesFile>(input, output),
        TableKind::ParagonBonuses => json_to_table::<ParagonBonusesFile>(input, output),
        TableKind::PowerFormulaTables => json_to_table::<PowerFormulaTablesFile>(input, output),
        TableKind::RareItemNames => json_to_table::<RareItemNamesFile>(input, output),
        TableKind::TransmuteRecipes => json_to_table::<TransmuteRecipesFile>(input, output),
        TableKind::Recipes => json_to_table::<RecipesFile>(input, output),
        TableKind::SetItemBonuses => json_to_table::<SetItemBonusesFile>(input, output),
        TableKind::EnchantCostScalars => json_to_table::<EnchantCostScalarsFile>(input, output),
        TableKind::LegacyItemConversions => json_to_table::<LegacyItemConversionsFile>(input, output),
        TableKind::TieredLootRunLevels => json_to_table::<TieredLootRunLevelsFile>(input, output),
    }
}

fn mon_to_json(input: &Path, output: &Path, options: &LayoutOptions) -> Result<String> {
    let image = std::fs::read(input).into_diagnostic()?;
    let doc = MonsterDocument::read(&image, options)?;
    write_json(output, &doc)?;
    let mode = match &doc.layout {
        Some(LayoutReport::Scanned { shift, score }) => {
            format!("SCANNED, shift {shift}, score {score}")
        }
        Some(LayoutReport::Legacy { reason }) => format!("LEGACY, {reason}"),
        None => "UNKNOWN".to_string(),
    };
    Ok(format!("Monster (.mon) -> JSON [{mode}]"))
}

fn json_to_mon(input: &Path, output: &Path, options: &LayoutOptions) -> Result<String> {
    let doc: MonsterDocument = read_json(input)?;
    std::fs::write(output, doc.write(options)?).into_diagnostic()?;
    Ok("JSON -> Monster (.mon)".to_string())
}

fn acr_to_json(input: &Path, output: &Path) -> Result<String> {
    let image = std::fs::read(input).into_diagnostic()?;
    let doc = ActorDocument::read(&image)?;
    write_json(output, &doc)?;
    Ok(format!(
        "Actor (.acr) -> JSON, tail {} bytes",
        doc.tail_raw.size_bytes.max(0)
    ))
}

fn qst_to_json(input: &Path, output: &Path) -> Result<String> {
    let image = std::fs::read(input).into_diagnostic()?;
    let doc = QuestDocument::read(&image)?;
    write_json(output, &doc)?;
    Ok(format!(
        "QST -> steps={}, comp={}",
        doc.number_of_steps, doc.number_of_completion_steps
    ))
}

fn json_to_qst(input: &Path, output: &Path) -> Result<String> {
    let doc: QuestDocument = read_json(input)?;
    std::fs::write(output, doc.write()?).into_diagnostic()?;
    Ok(format!(
        "JSON -> QST, steps={}, comp={}",
        doc.number_of_steps, doc.number_of_completion_steps
    ))
}
