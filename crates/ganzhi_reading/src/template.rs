//! Rule-based narrative in Chinese, English and Māori.
//!
//! Five sections: overall structure, day master and elements, strengths,
//! pressures, adjustments. The focus only changes the last sentence of
//! the strengths, pressures and adjustments sections.

use std::fmt::Write;

use ganzhi_base::{
    BalanceLabel, ChartAnalysis, ChartPillar, DayMasterStrength, Element, PillarPosition, TenGod,
};

use crate::error::NarrativeError;
use crate::narrative::{NarrativeContext, Narrator};
use crate::request::{Focus, Language};

/// Built-in narrator; always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl Narrator for TemplateNarrator {
    fn name(&self) -> &'static str {
        "template"
    }

    fn narrate(&self, ctx: &NarrativeContext<'_>) -> Result<String, NarrativeError> {
        Ok(render(ctx))
    }
}

/// Render the five-section text.
pub fn render(ctx: &NarrativeContext<'_>) -> String {
    match ctx.language {
        Language::Zh => render_zh(ctx),
        Language::En => render_en(ctx),
        Language::Mi => render_mi(ctx),
    }
}

/// One-paragraph digest of the structured analysis.
pub fn summary(analysis: &ChartAnalysis, language: Language) -> String {
    let b = &analysis.element_analysis;
    let l = language;
    let day = analysis.day_master;
    let missing = join_elements(&b.missing_elements, l);
    match language {
        Language::Zh => format!(
            "日主{}{}，{}。{}，{}最旺，{}。用神{}，忌神{}。",
            day.chinese(),
            element_name(analysis.day_element, l),
            strength_name(analysis.day_master_strength, l),
            balance_name(b.element_balance, l),
            element_name(b.dominant_element, l),
            if b.missing_elements.is_empty() {
                "五行俱全".to_string()
            } else {
                format!("缺{missing}")
            },
            optional_element(analysis.use_god, l),
            optional_element(analysis.avoid_god, l),
        ),
        Language::En => format!(
            "Day master {} ({}), {}. Elements {}, {} dominant, {} missing. Use god {}; avoid god {}.",
            day.name(),
            element_name(analysis.day_element, l),
            strength_name(analysis.day_master_strength, l),
            balance_name(b.element_balance, l),
            element_name(b.dominant_element, l),
            if missing.is_empty() { "none" } else { missing.as_str() },
            optional_element(analysis.use_god, l),
            optional_element(analysis.avoid_god, l),
        ),
        Language::Mi => format!(
            "Rangatira Rā: {} ({}), {}. Ngā Rima: {}; ko {} te mea nui; kua ngaro: {}. Te Atua Whakamahi: {}; Te Atua Pare: {}.",
            day.name(),
            element_name(analysis.day_element, l),
            strength_name(analysis.day_master_strength, l),
            balance_name(b.element_balance, l),
            element_name(b.dominant_element, l),
            if missing.is_empty() { "kore" } else { missing.as_str() },
            optional_element(analysis.use_god, l),
            optional_element(analysis.avoid_god, l),
        ),
    }
}

fn render_zh(ctx: &NarrativeContext<'_>) -> String {
    let a = ctx.analysis;
    let b = &a.element_analysis;
    let l = Language::Zh;
    let day_el = element_name(a.day_element, l);
    let [adv, challenge, advice] = focus_lines(ctx.focus, l);

    let structure = match b.element_balance {
        BalanceLabel::Balanced => "整体结构相对均衡，性格与能力的不同面向比较容易同时展开。",
        BalanceLabel::MildlySkewed => "命局在一两个方向上略有侧重，容易在特定领域更投入。",
        BalanceLabel::SignificantlySkewed => "五行力量对比明显，性格与人生节奏往往比较鲜明。",
    };
    let missing = if b.missing_elements.is_empty() {
        "五行并无完全缺失，只是轻重有别。".to_string()
    } else {
        format!(
            "{}行力量偏少，相关主题往往需要主动经营和学习。",
            join_elements(&b.missing_elements, l)
        )
    };
    let use_god = match a.use_god {
        Some(e) => format!("{}行所代表的品质，适合作为长期培养和依靠的方向。", element_name(e, l)),
        None => "用神需结合大运流年综合判断。".to_string(),
    };
    let avoid_god = match a.avoid_god {
        Some(e) => format!("{}行相关的能量若用力过度，容易放大压力，宜保持节制。", element_name(e, l)),
        None => "暂无需要刻意回避的单一能量，重在整体平衡。".to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "【总体结构判断】");
    let _ = writeln!(out, "{}", pillar_line(ctx, l));
    let _ = writeln!(
        out,
        "日主属{day_el}，日主{}，命局呈「{}」的格局。{structure}",
        strength_name(a.day_master_strength, l),
        balance_name(b.element_balance, l),
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "【五行与日主关系说明】");
    let _ = writeln!(
        out,
        "五行分布：{}。当前命局中{}行力量相对突出。{missing}",
        distribution(a, l),
        element_name(b.dominant_element, l),
    );
    let _ = writeln!(
        out,
        "日主为{day_el}，通常代表{}的特质。",
        trait_of(a.day_element, l)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "【优势倾向】");
    let _ = writeln!(out, "1. 你更容易依赖{day_el}相关的思维和行为方式，在熟悉的领域表现出稳定的优势。");
    let _ = writeln!(out, "2. 十神配置：{}。", ten_god_line(a, l));
    let _ = writeln!(out, "3. {adv}");
    let _ = writeln!(out);
    let _ = writeln!(out, "【潜在压力或挑战】");
    let _ = writeln!(out, "1. 偏重的五行长期被过度使用时，容易惯性太强、弹性不足。");
    let _ = writeln!(out, "2. {missing}");
    let _ = writeln!(out, "3. {challenge}");
    let _ = writeln!(out);
    let _ = writeln!(out, "【可执行的调整建议】");
    let _ = writeln!(out, "1. 用神方向：{use_god}");
    let _ = writeln!(out, "2. 需要留意：{avoid_god}");
    let _ = write!(out, "3. {advice}");
    out
}

fn render_en(ctx: &NarrativeContext<'_>) -> String {
    let a = ctx.analysis;
    let b = &a.element_analysis;
    let l = Language::En;
    let day_el = element_name(a.day_element, l);
    let [adv, challenge, advice] = focus_lines(ctx.focus, l);

    let structure = match b.element_balance {
        BalanceLabel::Balanced => {
            "The structure is fairly even, so different sides of your character can develop together."
        }
        BalanceLabel::MildlySkewed => {
            "The chart leans in one or two directions, so you tend to invest more in particular areas."
        }
        BalanceLabel::SignificantlySkewed => {
            "The elements are sharply uneven, which usually shows as a distinct temperament and rhythm of life."
        }
    };
    let missing = if b.missing_elements.is_empty() {
        "No element is entirely absent; the differences are of weight, not of presence.".to_string()
    } else {
        format!(
            "{} is scarce, so its themes usually need deliberate cultivation.",
            join_elements(&b.missing_elements, l)
        )
    };
    let use_god = match a.use_god {
        Some(e) => format!("the qualities of {} are worth building on over the long term.", element_name(e, l)),
        None => "the use god needs the luck cycles to be judged.".to_string(),
    };
    let avoid_god = match a.avoid_god {
        Some(e) => format!("leaning too hard on {} tends to amplify pressure; keep it moderate.", element_name(e, l)),
        None => "no single energy needs avoiding; overall balance matters most.".to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "【Overall structure】");
    let _ = writeln!(out, "{}", pillar_line(ctx, l));
    let _ = writeln!(
        out,
        "Your day master is {day_el} and {}; the elements are {}. {structure}",
        strength_name(a.day_master_strength, l),
        balance_name(b.element_balance, l),
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "【Day master and the five elements】");
    let _ = writeln!(
        out,
        "Distribution: {}. {} stands out in this chart. {missing}",
        distribution(a, l),
        element_name(b.dominant_element, l),
    );
    let _ = writeln!(
        out,
        "A {day_el} day master is typically {}.",
        trait_of(a.day_element, l)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "【Strengths】");
    let _ = writeln!(
        out,
        "1. You tend to rely on {day_el} ways of thinking and acting, and show steady strength on familiar ground."
    );
    let _ = writeln!(out, "2. Ten gods: {}.", ten_god_line(a, l));
    let _ = writeln!(out, "3. {adv}");
    let _ = writeln!(out);
    let _ = writeln!(out, "【Pressures and challenges】");
    let _ = writeln!(
        out,
        "1. When the heavier elements are overused, habit can outweigh flexibility."
    );
    let _ = writeln!(out, "2. {missing}");
    let _ = writeln!(out, "3. {challenge}");
    let _ = writeln!(out);
    let _ = writeln!(out, "【Practical adjustments】");
    let _ = writeln!(out, "1. Use god: {use_god}");
    let _ = writeln!(out, "2. Avoid god: {avoid_god}");
    let _ = write!(out, "3. {advice}");
    out
}

fn render_mi(ctx: &NarrativeContext<'_>) -> String {
    let a = ctx.analysis;
    let b = &a.element_analysis;
    let l = Language::Mi;
    let day_el = element_name(a.day_element, l);
    let [adv, challenge, advice] = focus_lines(ctx.focus, l);

    let missing = if b.missing_elements.is_empty() {
        "Kāore he mea i ngaro katoa.".to_string()
    } else {
        format!(
            "He iti te {}; me whakapakari ā-whakaaro.",
            join_elements(&b.missing_elements, l)
        )
    };

    let mut out = String::new();
    let _ = writeln!(out, "【Te arotake whānui o te hanganga】");
    let _ = writeln!(out, "{}", pillar_line(ctx, l));
    let _ = writeln!(
        out,
        "Ko {day_el} tō Rangatira Rā, {}; te taurite: {}.",
        strength_name(a.day_master_strength, l),
        balance_name(b.element_balance, l),
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "【Te hononga o te Rangatira Rā ki ngā Rima o ngā mea】");
    let _ = writeln!(
        out,
        "Te whakawhitinga: {}. Ko {} te mea nui. {missing}",
        distribution(a, l),
        element_name(b.dominant_element, l),
    );
    let _ = writeln!(
        out,
        "Ko te tangata he {day_el} tōna Rangatira Rā, {}.",
        trait_of(a.day_element, l)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "【Ngā kaha me ngā ia tautoko】");
    let _ = writeln!(out, "1. Ngā Atua Tekau: {}.", ten_god_line(a, l));
    let _ = writeln!(out, "2. {adv}");
    let _ = writeln!(out);
    let _ = writeln!(out, "【Ngā pēhitanga, ngā wero pea】");
    let _ = writeln!(out, "1. {missing}");
    let _ = writeln!(out, "2. {challenge}");
    let _ = writeln!(out);
    let _ = writeln!(out, "【Ngā tohutohu whakatikatika ka taea te mahi】");
    let _ = writeln!(
        out,
        "1. Te Atua Whakamahi: {}; Te Atua Pare: {}.",
        optional_element(a.use_god, l),
        optional_element(a.avoid_god, l),
    );
    let _ = write!(out, "2. {advice}");
    out
}

fn element_name(e: Element, l: Language) -> &'static str {
    match l {
        Language::Zh => e.chinese(),
        Language::En => e.name(),
        Language::Mi => match e {
            Element::Wood => "Rākau",
            Element::Fire => "Ahi",
            Element::Earth => "Whenua",
            Element::Metal => "Konganuku",
            Element::Water => "Wai",
        },
    }
}

fn optional_element(e: Option<Element>, l: Language) -> &'static str {
    match (e, l) {
        (Some(e), _) => element_name(e, l),
        (None, Language::Zh) => "无",
        (None, Language::En) => "none",
        (None, Language::Mi) => "kore",
    }
}

fn join_elements(elements: &[Element], l: Language) -> String {
    let sep = match l {
        Language::Zh => "、",
        Language::En | Language::Mi => ", ",
    };
    elements
        .iter()
        .map(|&e| element_name(e, l))
        .collect::<Vec<_>>()
        .join(sep)
}

fn balance_name(label: BalanceLabel, l: Language) -> &'static str {
    match (l, label) {
        (Language::Zh, BalanceLabel::Balanced) => "五行较为平衡",
        (Language::Zh, BalanceLabel::MildlySkewed) => "五行略有偏颇",
        (Language::Zh, BalanceLabel::SignificantlySkewed) => "五行明显偏颇",
        (Language::En, _) => label.name(),
        (Language::Mi, BalanceLabel::Balanced) => "he taurite",
        (Language::Mi, BalanceLabel::MildlySkewed) => "he paku tītaha",
        (Language::Mi, BalanceLabel::SignificantlySkewed) => "he tino tītaha",
    }
}

fn strength_name(s: DayMasterStrength, l: Language) -> &'static str {
    match (l, s) {
        (Language::Zh, DayMasterStrength::Strong) => "偏强",
        (Language::Zh, DayMasterStrength::Weak) => "偏弱",
        (Language::En, _) => s.name(),
        (Language::Mi, DayMasterStrength::Strong) => "kaha",
        (Language::Mi, DayMasterStrength::Weak) => "ngoikore",
    }
}

fn ten_god_name(g: TenGod, l: Language) -> &'static str {
    match l {
        Language::Zh => g.chinese(),
        Language::En | Language::Mi => g.name(),
    }
}

fn position_name(p: PillarPosition, l: Language) -> &'static str {
    match (l, p) {
        (Language::Zh, PillarPosition::Year) => "年柱",
        (Language::Zh, PillarPosition::Month) => "月柱",
        (Language::Zh, PillarPosition::Day) => "日柱",
        (Language::Zh, PillarPosition::Hour) => "时柱",
        (Language::En, PillarPosition::Year) => "Year",
        (Language::En, PillarPosition::Month) => "Month",
        (Language::En, PillarPosition::Day) => "Day",
        (Language::En, PillarPosition::Hour) => "Hour",
        (Language::Mi, PillarPosition::Year) => "Tau",
        (Language::Mi, PillarPosition::Month) => "Marama",
        (Language::Mi, PillarPosition::Day) => "Rā",
        (Language::Mi, PillarPosition::Hour) => "Hāora",
    }
}

fn pillar_name(p: &ChartPillar, l: Language) -> String {
    match l {
        Language::Zh => format!("{}{}", p.stem.chinese(), p.branch.chinese()),
        Language::En | Language::Mi => p.pillar().to_string(),
    }
}

/// "Year Geng-Wu (Metal, Horse); Month ..." with a note for a missing hour.
fn pillar_line(ctx: &NarrativeContext<'_>, l: Language) -> String {
    let sep = match l {
        Language::Zh => "；",
        Language::En | Language::Mi => "; ",
    };
    let mut parts: Vec<String> = ctx
        .chart
        .pillars()
        .map(|(pos, p)| {
            let animal = p.animal.map(|a| match l {
                Language::Zh => a.chinese(),
                Language::En | Language::Mi => a.name(),
            });
            match animal {
                Some(animal) => format!(
                    "{} {} ({}, {animal})",
                    position_name(pos, l),
                    pillar_name(p, l),
                    element_name(p.element, l)
                ),
                None => format!(
                    "{} {} ({})",
                    position_name(pos, l),
                    pillar_name(p, l),
                    element_name(p.element, l)
                ),
            }
        })
        .collect();
    if ctx.chart.hour.is_none() {
        parts.push(
            match l {
                Language::Zh => "时柱未提供，信息有限",
                Language::En => "Hour not provided",
                Language::Mi => "Hāora: kāore i whakaratoa",
            }
            .to_string(),
        );
    }
    parts.join(sep)
}

fn distribution(a: &ChartAnalysis, l: Language) -> String {
    a.element_analysis
        .element_count
        .iter()
        .map(|(e, v)| match l {
            Language::Zh => format!("{}{v:.1}", element_name(e, l)),
            Language::En | Language::Mi => format!("{} {v:.1}", element_name(e, l)),
        })
        .collect::<Vec<_>>()
        .join(match l {
            Language::Zh => "，",
            Language::En | Language::Mi => ", ",
        })
}

fn ten_god_line(a: &ChartAnalysis, l: Language) -> String {
    let s = &a.ten_god_analysis;
    if s.pillars.is_empty() {
        return match l {
            Language::Zh => "各类角色能量较为均衡",
            Language::En => "the ten gods are evenly spread",
            Language::Mi => "he taurite ngā atua tekau",
        }
        .to_string();
    }
    s.pillars
        .iter()
        .map(|p| match l {
            Language::Zh => format!("{}{}", position_name(p.position, l), ten_god_name(p.ten_god, l)),
            Language::En | Language::Mi => format!(
                "{} {}",
                position_name(p.position, l),
                ten_god_name(p.ten_god, l)
            ),
        })
        .collect::<Vec<_>>()
        .join(match l {
            Language::Zh => "、",
            Language::En | Language::Mi => ", ",
        })
}

fn trait_of(e: Element, l: Language) -> &'static str {
    match (l, e) {
        (Language::Zh, Element::Wood) => "富有创造力和活力、善于成长",
        (Language::Zh, Element::Fire) => "热情开朗、善于表达",
        (Language::Zh, Element::Earth) => "稳重踏实、值得信赖",
        (Language::Zh, Element::Metal) => "理性果断、讲求原则",
        (Language::Zh, Element::Water) => "灵活变通、适应力强",
        (Language::En, Element::Wood) => "creative and energetic, oriented to growth",
        (Language::En, Element::Fire) => "warm and outgoing, good at expression",
        (Language::En, Element::Earth) => "steady and practical, reliable",
        (Language::En, Element::Metal) => "rational and decisive, principled",
        (Language::En, Element::Water) => "flexible and adaptable, perceptive",
        (Language::Mi, Element::Wood) => "he auaha, he hihiri, pai ki te tipu",
        (Language::Mi, Element::Fire) => "he ngākau nui, pai ki te whakaputa",
        (Language::Mi, Element::Earth) => "he pūmau, he pono",
        (Language::Mi, Element::Metal) => "he whakatau, he whai kaupapa",
        (Language::Mi, Element::Water) => "he ngāwari, he mārama",
    }
}

/// Strength, challenge and advice sentences for a focus.
fn focus_lines(focus: Focus, l: Language) -> [&'static str; 3] {
    match (l, focus) {
        (Language::Zh, Focus::Overall) => [
            "整体来看，你适合在熟悉可控的节奏中打磨优势，让人生呈现稳中有进的趋势。",
            "当节奏被外力打乱或多重任务并行时，容易感到心力被拉扯，需要学会取舍。",
            "给自己设定清晰的优先级并保留固定的休整时间，在稳定的基础上逐步拓展。",
        ],
        (Language::Zh, Focus::Career) => [
            "在事业上，你适合通过长期积累建立专业信任，在需要持续深耕的领域发力。",
            "在职业转换时，你可能对不确定性更敏感，需要给自己留出过渡的空间。",
            "寻找能发挥核心能力且允许渐进成长的路径，避免为迎合外在评价而透支。",
        ],
        (Language::Zh, Focus::Wealth) => [
            "在财富上，这种配置有利于通过稳健经营和长期规划累积成果。",
            "在“求稳”与“求快”之间可能出现拉扯，需要留意情绪化决策。",
            "建立自己认可的理财原则，小步长期执行，少做大幅度的策略调整。",
        ],
        (Language::Zh, Focus::Love) => [
            "在情感关系中，你表达关怀与陪伴他人时往往真诚而有分寸。",
            "你既期待稳定可靠，又希望保留个人空间，容易带来内在矛盾。",
            "用坦诚沟通说明自己的节奏和边界，而不是用过度付出或退缩来试探关系。",
        ],
        (Language::Zh, Focus::Health) => [
            "在精力管理上，运用得当可以形成稳定的作息与恢复节奏。",
            "压力累积时你不易察觉透支，容易用“再坚持一下”掩盖疲惫。",
            "以可持续为标准安排节奏，设定固定的休整窗口，用运动和睡眠温和排压。",
        ],
        (Language::Zh, Focus::Family) => [
            "在家庭中，你承担责任、照顾他人感受时具有稳定性和耐心。",
            "你可能在照顾自己与照顾他人之间摇摆，需要更清晰地表达真实需求。",
            "在家庭议题上建立可以商量的空间，而不是以自我牺牲维系关系。",
        ],
        (Language::En, Focus::Overall) => [
            "Overall you do best polishing your strengths at a familiar, controllable pace, so life moves forward steadily.",
            "When outside forces break your rhythm or tasks pile up, you may feel pulled apart and need to choose deliberately.",
            "Set clear priorities and keep regular time to recover, then widen your range from a stable base.",
        ],
        (Language::En, Focus::Career) => [
            "In your career, long accumulation builds professional trust; fields that reward steady depth suit you.",
            "Around job changes you may be more sensitive to uncertainty, so allow yourself time to adjust.",
            "Look for paths that use your core abilities and allow gradual growth, without burning out for outside approval.",
        ],
        (Language::En, Focus::Wealth) => [
            "With money, this configuration favours steady management and long-range planning over short-term luck.",
            "You may feel torn between wanting safety and wanting speed; watch for emotional decisions.",
            "Adopt money rules you believe in and apply them in small, consistent steps rather than frequent big swings.",
        ],
        (Language::En, Focus::Love) => [
            "In relationships you tend to show care and support sincerely and with a sense of proportion.",
            "You may want stability and also personal space, which can create inner tension.",
            "Explain your pace and boundaries openly instead of testing the relationship by over-giving or withdrawing.",
        ],
        (Language::En, Focus::Health) => [
            "Used well, this structure supports a steady rhythm of effort and recovery.",
            "As stress builds you may not notice depletion and keep pushing past fatigue.",
            "Plan by what is sustainable: fixed recovery windows, exercise, sleep and honest expression of feelings.",
        ],
        (Language::En, Focus::Family) => [
            "At home you bring stability and patience to responsibilities and to other people's feelings.",
            "You may swing between caring for yourself and caring for others; name your real needs more clearly.",
            "Make family topics open to discussion, and sustain relationships by negotiation rather than self-sacrifice.",
        ],
        (Language::Mi, Focus::Overall) => [
            "Ka pai koe ki te whakapakari i ō kaha i te ia e mōhio ana koe.",
            "Ina whakararurarua te ia, me ako koe ki te kōwhiri.",
            "Whakaritea ngā mea matua, ā, waiho he wā okioki pūmau.",
        ],
        (Language::Mi, Focus::Career) => [
            "I te mahi, mā te kohikohi roa e hanga te whakawhirinaki.",
            "I ngā panonitanga mahi, tērā pea ka māharahara koe.",
            "Kimihia he ara e whakamahi ana i ō pūkenga matua.",
        ],
        (Language::Mi, Focus::Wealth) => [
            "I te taha pūtea, ka pai te whakahaere pūmau me te whakamahere roa.",
            "Tūpato ki ngā whakatau ā-kare-ā-roto.",
            "Whakaritea ō ture pūtea, ā, whāia mā ngā hīkoi iti.",
        ],
        (Language::Mi, Focus::Love) => [
            "I ngā hononga, he pono tō manaaki i te tangata.",
            "Ka hiahia koe ki te pūmau me tō ake wāhi anō.",
            "Kōrero tōtika mō ō rohe me tō ia.",
        ],
        (Language::Mi, Focus::Health) => [
            "Ki te tika te whakamahi, ka pūmau tō ia mahi, tō ia okioki.",
            "Ina piki te pēhanga, kāore pea koe e kite kua pau tō kaha.",
            "Whakaritea he wā okioki, he korikori tinana, he moe pai.",
        ],
        (Language::Mi, Focus::Family) => [
            "I te whānau, he pūmau, he manawanui koe.",
            "Me whakaatu mārama koe i ō tino hiahia.",
            "Whakatuwheratia he wāhi kōrero mō ngā take whānau.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganzhi_base::{analyze_chart, compute_chart};
    use ganzhi_time::CivilDate;

    fn render_for(hour: Option<u32>, focus: Focus, language: Language) -> String {
        let chart = compute_chart(CivilDate::new(1990, 1, 1).unwrap(), hour).unwrap();
        let analysis = analyze_chart(&chart);
        render(&NarrativeContext {
            chart: &chart,
            analysis: &analysis,
            focus,
            language,
        })
    }

    #[test]
    fn five_sections_in_every_language() {
        for language in [Language::Zh, Language::En, Language::Mi] {
            let text = render_for(Some(12), Focus::Overall, language);
            assert_eq!(text.matches('【').count(), 5, "{language}");
        }
    }

    #[test]
    fn english_mentions_chart_facts() {
        let text = render_for(None, Focus::Overall, Language::En);
        assert!(text.contains("Year Geng-Wu (Metal, Horse)"));
        assert!(text.contains("Hour not provided"));
        assert!(text.contains("Fire day master"));
        assert!(text.contains("Earth stands out"));
        assert!(text.contains("Year Indirect Wealth, Month Hurting Officer"));
        assert!(text.contains("qualities of Water"));
    }

    #[test]
    fn chinese_uses_characters() {
        let text = render_for(Some(12), Focus::Overall, Language::Zh);
        assert!(text.contains("庚午"));
        assert!(text.contains("日主属火"));
        assert!(text.contains("时柱偏印"));
        assert!(!text.contains("时柱未提供"));
    }

    #[test]
    fn focus_changes_text() {
        let overall = render_for(None, Focus::Overall, Language::En);
        let career = render_for(None, Focus::Career, Language::En);
        assert_ne!(overall, career);
        assert!(career.contains("In your career"));
    }

    #[test]
    fn summary_lines() {
        let chart = compute_chart(CivilDate::new(1990, 1, 1).unwrap(), None).unwrap();
        let analysis = analyze_chart(&chart);
        assert_eq!(
            summary(&analysis, Language::En),
            "Day master Bing (Fire), strong. Elements mildly skewed, Earth dominant, none missing. \
             Use god Water; avoid god Wood."
        );
        assert_eq!(
            summary(&analysis, Language::Zh),
            "日主丙火，偏强。五行略有偏颇，土最旺，五行俱全。用神水，忌神木。"
        );
    }
}
