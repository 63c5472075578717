//! Shared test data: a two-class catalogue, tooltip templates and a baseline
//! armory snapshot for a Berserker.

pub const CLASS: &str = "버서커";

pub const CATALOGUE_JSON: &str = r#"{
  "버서커": {
    "진화": [
      { "name": "치명", "tier": 1, "icon": "1_1", "max": 30 },
      { "name": "특화", "tier": 1, "icon": "1_2", "max": 30 },
      { "name": "신속", "tier": 1, "icon": "1_3", "max": 30 },
      { "name": "끝없는 마나", "tier": 2, "icon": "2_1", "max": 2 },
      { "name": "예리한 감각", "tier": 2, "icon": "2_2", "max": 2 },
      { "name": "한계 돌파", "tier": 2, "icon": "2_3", "max": 3 },
      { "name": "뭉툭한 가시", "tier": 4, "icon": "4_1", "max": 2 }
    ],
    "깨달음": [
      { "name": "광전사의 비기", "tier": 1, "icon": "bk_skill_01_28", "max": 1, "cost": 24,
        "tooltip": "{\"Element_000\":\"광전사의 비기\"}" },
      { "name": "피의 갈망", "tier": 2, "icon": "bk_12", "max": 3, "cost": 8 },
      { "name": "폭주 강화", "tier": 3, "icon": "bk_13", "max": 3, "cost": 8 }
    ],
    "도약": [
      { "name": "초월적인 힘", "tier": 1, "icon": "leap_01", "max": 5, "cost": 2 },
      { "name": "충만한 기운", "tier": 1, "icon": "leap_02", "max": 5, "cost": 2 },
      { "name": "잠재력 해방", "tier": 2, "icon": "potential", "max": 1, "cost": 10 }
    ]
  },
  "소서리스": {
    "진화": [
      { "name": "치명", "tier": 1, "icon": "1_1", "max": 30 }
    ],
    "깨달음": [
      { "name": "점화", "tier": 1, "icon": "sorc_01", "max": 1, "cost": 24 }
    ]
  }
}"#;

/// Baseline: 치명 10, 끝없는 마나 2, 광전사의 비기 1, 초월적인 힘 5, plus one
/// evolution effect the catalogue does not know.
pub const BASELINE_JSON: &str = r#"{
  "ArkPassive": {
    "IsArkPassive": true,
    "Points": [
      { "Name": "진화", "Value": 30, "Description": "3랭크 10레벨" },
      { "Name": "깨달음", "Value": 24, "Description": "1랭크 1레벨" },
      { "Name": "도약", "Value": 10, "Description": "1랭크 5레벨" }
    ],
    "Effects": [
      { "Name": "진화", "Description": "<FONT color='#F1D594'>진화</FONT> 1티어 <FONT color='#FFFFFF'>치명 Lv.10</FONT>",
        "Icon": "https://cdn.example/evolution_1_1.png", "ToolTip": "{\"Element_000\":\"치명\"}" },
      { "Name": "진화", "Description": "진화 2티어 끝없는 마나 Lv.2", "Icon": "https://cdn.example/evolution_2_1.png", "ToolTip": "" },
      { "Name": "깨달음", "Description": "깨달음 1티어 광전사의 비기 Lv.1", "Icon": "https://cdn.example/bk.png", "ToolTip": null },
      { "Name": "도약", "Description": "도약 1티어 초월적인 힘 Lv.5", "Icon": "https://cdn.example/leap.png", "ToolTip": "" },
      { "Name": "진화", "Description": "진화 5티어 미지의 노드 Lv.1", "Icon": "", "ToolTip": "" }
    ]
  }
}"#;

/// A different Berserker build, used for character switching.
pub const OTHER_BASELINE_JSON: &str = r#"{
  "Points": [ { "Name": "진화", "Value": 20, "Description": "2랭크 0레벨" } ],
  "Effects": [
    { "Name": "진화", "Description": "진화 1티어 특화 Lv.20", "Icon": "", "ToolTip": "" }
  ]
}"#;

pub const TOOLTIPS_JSON: &str = r#"{
  "*": {
    "진화": {
      "치명": { "1": ["치명 +50"], "10": ["치명 +500"], "11": ["치명 +550"] },
      "끝없는 마나": { "1": ["마나 회복 +10%"], "2": ["마나 회복 +20%", "스킬 재사용 대기시간 -2%"] }
    }
  },
  "버서커": {
    "진화": {
      "치명": { "11": ["버서커 전용 치명 +550"] }
    },
    "깨달음": {
      "광전사의 비기": { "1": ["폭주 지속 시간 동안 치명타 적중률 +20%"] }
    }
  }
}"#;
