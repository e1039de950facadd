//! Integration tests for xuanji_rs: birth input through to finished charts.

use xuanji_rs::*;

fn male_1990() -> BirthInput {
    BirthInput::solar(1990, 5, 15, 14, 30, Gender::Male)
}

fn female_1985() -> BirthInput {
    BirthInput::solar(1985, 8, 23, 10, 45, Gender::Female)
}

fn pillar_names(c: &BaziChart) -> Vec<String> {
    let p = &c.pillars;
    [p.year, p.month, p.day, p.hour]
        .iter()
        .map(|x| x.ganzhi.name())
        .collect()
}

#[test]
fn lunar_info_male_1990() {
    let info = lunar(&male_1990()).unwrap();
    assert_eq!(info.text, "庚午年 四月廿一");
    assert_eq!(info.year_ganzhi.name(), "庚午");
    assert_eq!(info.animal, "马");
    assert_eq!(info.hour_branch, Branch::Wei);
    assert_eq!(info.leap_month, Some(5));
}

#[test]
fn lunar_info_without_leap_month() {
    let info = lunar(&female_1985()).unwrap();
    assert_eq!(info.text, "乙丑年 七月初八");
    assert_eq!(info.animal, "牛");
    assert_eq!(info.leap_month, None);
}

#[test]
fn ziwei_from_solar_input() {
    let c = ziwei(&male_1990(), &ChartConfig::default()).unwrap();
    assert_eq!(c.lunar_date, "庚午年 四月廿一");
    assert_eq!(c.life_branch, Branch::Xu);
    assert_eq!(c.body_branch, Branch::Zi);
}

#[test]
fn ziwei_from_lunar_input_matches_solar() {
    let config = ChartConfig::default();
    let solar = ziwei(&male_1990(), &config).unwrap();
    let lunar = ziwei(
        &BirthInput::lunar(1990, 4, 21, false, 14, 30, Gender::Male),
        &config,
    )
    .unwrap();
    assert_eq!(solar, lunar);
}

#[test]
fn ziwei_female_1985() {
    let c = ziwei(&female_1985(), &ChartConfig::default()).unwrap();
    assert_eq!(c.life_branch, Branch::Mao);
    assert_eq!(c.body_branch, Branch::Chou);
}

#[test]
fn bazi_pillars() {
    let config = ChartConfig::default();
    let male = bazi(&male_1990(), &config).unwrap();
    assert_eq!(pillar_names(&male), ["庚午", "辛巳", "庚辰", "癸未"]);
    let female = bazi(&female_1985(), &config).unwrap();
    assert_eq!(pillar_names(&female), ["乙丑", "甲申", "甲午", "己巳"]);
    assert_eq!(female.major_periods.periods[0].ganzhi.name(), "乙酉");
}

#[test]
fn major_period_count_follows_config() {
    let config = ChartConfig {
        major_period_count: 3,
        ..ChartConfig::default()
    };
    let c = bazi(&male_1990(), &config).unwrap();
    assert_eq!(c.major_periods.periods.len(), 3);

    let none = ChartConfig {
        major_period_count: 0,
        ..ChartConfig::default()
    };
    assert!(matches!(
        bazi(&male_1990(), &none),
        Err(XuanjiError::Bazi(_))
    ));
}

#[test]
fn yongshen_summaries() {
    let config = ChartConfig::default();
    let male = yongshen(&male_1990(), &config).unwrap();
    assert_eq!(male.summary_line(), "用神：乙；调候：水润；格局：高");
    let female = yongshen(&female_1985(), &config).unwrap();
    assert_eq!(female.summary_line(), "用神：癸；调候：不需；格局：高");
}

#[test]
fn foreign_offset_moves_to_beijing() {
    // 01:30 in UTC+9 is 00:30 in Beijing, same civil day.
    let input = BirthInput::solar(1990, 5, 15, 1, 30, Gender::Male).with_timezone("+09:00");
    let info = lunar(&input).unwrap();
    assert_eq!(info.beijing.hour, 0);
    assert_eq!(info.hour_branch, Branch::Zi);
    assert_eq!(info.text, "庚午年 四月廿一");
}

#[test]
fn errors_surface_by_layer() {
    let config = ChartConfig::default();
    let bad_hour = BirthInput::solar(1990, 5, 15, 25, 0, Gender::Male);
    assert!(matches!(
        ziwei(&bad_hour, &config),
        Err(XuanjiError::InvalidInput(_))
    ));

    let bad_day = BirthInput::solar(1990, 2, 29, 12, 0, Gender::Male);
    let err = bazi(&bad_day, &config).unwrap_err();
    assert!(matches!(err, XuanjiError::Calendar(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn results_serialize() {
    let config = ChartConfig::default();
    let info = serde_json::to_value(lunar(&male_1990()).unwrap()).unwrap();
    assert_eq!(info["text"], "庚午年 四月廿一");
    assert_eq!(info["year_ganzhi"], "庚午");

    let chart = serde_json::to_value(bazi(&male_1990(), &config).unwrap()).unwrap();
    assert_eq!(chart["pillars"]["day"]["ganzhi"], "庚辰");

    let input = serde_json::to_value(male_1990()).unwrap();
    assert_eq!(input["gender"], "male");
    assert_eq!(input["timezone"], serde_json::Value::Null);
}
