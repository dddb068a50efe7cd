use crate::commission::CommissionSchedule;
use crate::size::SizeRule;

use super::{CommissionOverride, RetailerProfile};

const PROMO_CATEGORY: &str = "Льготный период (Все категории)";
const PROMO_COMMISSION_PCT: f64 = 5.0;

/// Sportmaster FBS: weight-linear delivery fee. During the promo period
/// (first two months of a contract) every product pays one flat commission.
#[derive(Debug, Clone)]
pub struct Sportmaster {
    promo: bool,
    rule: SizeRule,
}

impl Sportmaster {
    #[must_use]
    pub fn new(promo: bool) -> Self {
        Self {
            promo,
            rule: SizeRule::WeightLinear {
                free_allowance_kg: 2.0,
                base_fee: 220.0,
                per_kg_fee: 90.0,
            },
        }
    }

    #[must_use]
    pub fn is_promo(&self) -> bool {
        self.promo
    }
}

impl RetailerProfile for Sportmaster {
    fn id(&self) -> &'static str {
        "sportmaster"
    }

    fn display_name(&self) -> &'static str {
        "Спортмастер (FBS)"
    }

    fn size_rule(&self) -> &SizeRule {
        &self.rule
    }

    fn default_commission_pct(&self) -> f64 {
        0.0
    }

    fn builtin_schedule(&self) -> CommissionSchedule {
        COMMISSIONS.into_iter().collect()
    }

    fn commission_override(&self) -> Option<CommissionOverride> {
        self.promo.then(|| CommissionOverride {
            category: PROMO_CATEGORY.to_string(),
            pct: PROMO_COMMISSION_PCT,
        })
    }
}

const COMMISSIONS: [(&str, f64); 122] = [
    ("SUP и аксессуары", 32.0),
    ("Автотуризм", 25.0),
    ("Аксессуары для велоспорта", 35.0),
    ("Аксессуары для водного туризма", 30.0),
    ("Аксессуары для горных и беговых лыж", 31.0),
    ("Аксессуары для единоборств", 32.0),
    ("Аксессуары для лодок", 29.0),
    ("Аксессуары для лыжероллеров", 29.0),
    ("Аксессуары для настольного тенниса", 35.0),
    ("Аксессуары для носимых устройств", 35.0),
    ("Аксессуары для оптики", 32.0),
    ("Аксессуары для ракеточных видов спорта", 35.0),
    ("Аксессуары для роликовых коньков, скейтбордов и самокатов", 33.0),
    ("Аксессуары для силовых тренировок", 33.0),
    ("Аксессуары для флорбола", 33.0),
    ("Аксессуары для хоккея", 30.0),
    ("Аксессуары и запчасти для вейкбординга, вейкфойлинга, виндсерфинга, серфинга, кайтсерфинга", 35.0),
    ("Аксессуары и инвентарь для плавания", 35.0),
    ("Бассейны и аксессуары", 28.0),
    ("Батуты", 28.0),
    ("Беговелы", 34.0),
    ("Беговые лыжи", 31.0),
    ("Белье и форма для хоккея", 31.0),
    ("Бильярд", 32.0),
    ("Ботинки для беговых лыж", 31.0),
    ("Брусья и турники", 32.0),
    ("Вейдерсы", 38.0),
    ("Вейкбординг, вейкфойлинг, виндсерфинг, серфинг, кайтсерфинг", 35.0),
    ("Велозащита", 35.0),
    ("Велокомпоненты", 35.0),
    ("Велокомпьютеры", 28.0),
    ("Велообувь", 32.0),
    ("Велоодежда", 35.0),
    ("Велосипеды", 22.0),
    ("Велостанки", 25.0),
    ("Гидрокостюмы, одежда и обувь для водного спорта", 33.0),
    ("Гироскутеры, роллерсерфы", 22.0),
    ("Гольф", 32.0),
    ("Горные лыжи, сноуборды, ботинки, крепления", 32.0),
    ("Дартс", 35.0),
    ("Дорожные аксессуары", 30.0),
    ("Защита для роликовых коньков, скейтбордов и самокатов", 33.0),
    ("Защита для хоккея", 31.0),
    ("Защита, шлемы, маски для горнолыжного спорта", 31.0),
    ("Зонты", 33.0),
    ("Игры для активного отдыха", 33.0),
    ("Инвентарь для альпинизма и скалолазания", 25.0),
    ("Инвентарь для единоборств", 33.0),
    ("Инвентарь для конного спорта", 28.0),
    ("Инвентарь для охоты", 35.0),
    ("Инвентарь для рыбалки", 30.0),
    ("Инвентарь и аксессуары для командных видов спорта", 36.0),
    ("Иные категории", 40.0),
    ("Карповые аксессуары", 31.0),
    ("Катушки", 34.0),
    ("Киберспорт", 22.0),
    ("Клубная атрибутика", 10.0),
    ("Клюшки для флорбола", 32.0),
    ("Клюшки для хоккея", 31.0),
    ("Косметика и спортивная медицина", 33.0),
    ("Ледовые коньки", 31.0),
    ("Лодки, байдарки, катамараны, пакрафты", 28.0),
    ("Лодочные моторы", 28.0),
    ("Луки и арбалеты", 31.0),
    ("Лыжероллеры", 31.0),
    ("Массажеры", 31.0),
    ("Мебель", 32.0),
    ("Мотозащита и мотошлемы", 26.0),
    ("Мототехника", 5.0),
    ("Мотоэкипировка", 26.0),
    ("Навигаторы, рации, солнечные панели, зарядные кемпинговые станции", 25.0),
    ("Насосы", 32.0),
    ("Настольные игры", 30.0),
    ("Наушники", 30.0),
    ("Обувь для взрослых и детей", 39.0),
    ("Обувь для единоборств", 33.0),
    ("Обувь для конного спорта", 32.0),
    ("Обувь для охоты и рыбалки", 40.0),
    ("Одежда для взрослых и детей", 34.0),
    ("Одежда для единоборств", 33.0),
    ("Одежда специальная", 32.0),
    ("Одежные аксессуары", 35.0),
    ("Оптика", 35.0),
    ("Отдых на воде", 35.0),
    ("Палатки", 35.0),
    ("Пейнтбол", 28.0),
    ("Перчатки и защита для единоборств", 32.0),
    ("Прикормки и насадки", 30.0),
    ("Прочие аксессуары", 35.0),
    ("Ракетки и наборы", 35.0),
    ("Ракетки и наборы для настольного тенниса", 35.0),
    ("Роботы для настольного тенниса", 25.0),
    ("Роликовые коньки", 32.0),
    ("Роллер-хоккей и коньки-трансформеры", 31.0),
    ("Рыболовные платформы и аксессуары", 29.0),
    ("Рыболовные приманки и оснастка", 35.0),
    ("Рюкзаки для походов и трекинга", 31.0),
    ("Самокаты", 31.0),
    ("Санки, снегокаты, ледянки и тюбинги", 33.0),
    ("Скейтборды", 32.0),
    ("Снаряжение для туризма, активного отдыха, рыбалки и охоты", 32.0),
    ("Снегоступы", 31.0),
    ("Сноускейты", 32.0),
    ("Солнцезащитные очки", 35.0),
    ("Спальные мешки", 32.0),
    ("Спортивное питание и БАДы", 31.0),
    ("Спортивные комплексы", 36.0),
    ("Столы для настольного тенниса", 30.0),
    ("Сумки и рюкзаки", 38.0),
    ("Суппорты", 35.0),
    ("Таймеры", 28.0),
    ("Тейпы", 35.0),
    ("Товары для животных", 32.0),
    ("Тренажеры", 31.0),
    ("Удилища", 35.0),
    ("Уход за одеждой, обувью и аксессуары", 33.0),
    ("Фитнес-аксессуары", 35.0),
    ("Фотоловушки", 32.0),
    ("Электровелосипеды", 29.0),
    ("Электроника", 28.0),
    ("Электросамокаты и электротранспорт", 29.0),
    ("Эхолоты", 31.0),
];
