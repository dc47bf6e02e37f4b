use chrono::NaiveDate;
use chrono::TimeDelta;
use examplan_calendar_environment::SemesterInput;
use examplan_calendar_environment::exam_week::Annotation;
use examplan_calendar_environment::exam_week::EXAM_DAYS_PER_WEEK;
use examplan_calendar_environment::exam_week::ExamWeekTag;
use examplan_calendar_environment::hip_week::HipStatus;
use examplan_calendar_environment::hip_week::HipWeek;
use examplan_calendar_environment::plan::Constraint;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::semester::SemesterId;
use examplan_calendar_environment::semester::SemesterKind;
use examplan_calendar_environment::time_environment::DateRange;
use examplan_calendar_environment::time_environment::week::Week;
use examplan_configuration::PlannerConfiguration;
use examplan_configuration::constraints::BufferPolicy;
use examplan_configuration::rules::RuleOrder;
use examplan_planner::ExamPeriodPlanner;
use proptest::prelude::*;

/// Semesters shaped like the TH Köln lecture periods: summer from mid March
/// for 18 weeks, winter from late September for 20 weeks, with an HIP week
/// somewhere in the first half or no announcement at all.
fn semester_input_strategy() -> impl Strategy<Value = SemesterInput>
{
    (
        2024i32..2040,
        prop_oneof![Just(SemesterKind::Summer), Just(SemesterKind::Winter)],
        0i64..3,
        5i64..11,
        any::<bool>(),
    )
        .prop_map(|(year, kind, start_offset, hip_offset, announced)| {
            let (search_start, lecture_weeks) = match kind {
                SemesterKind::Summer => (NaiveDate::from_ymd_opt(year, 3, 10).unwrap(), 17),
                SemesterKind::Winter => (NaiveDate::from_ymd_opt(year, 9, 20).unwrap(), 19),
            };
            let lecture_start =
                Week::containing(search_start).monday() + TimeDelta::weeks(start_offset);
            let lecture_end = lecture_start + TimeDelta::weeks(lecture_weeks) + TimeDelta::days(4);

            let semester = Semester::new(
                SemesterId::new(year, kind),
                DateRange::new(lecture_start, lecture_end).unwrap(),
                !announced,
            );
            let hip_week = announced.then(|| {
                let offset = kind.number_of_first_block_weeks() as i64 + hip_offset;
                HipWeek::new(
                    Week::containing(lecture_start + TimeDelta::weeks(offset)),
                    HipStatus::Fixed,
                )
            });
            SemesterInput::new(semester, hip_week)
        })
}

fn rule_order_strategy() -> impl Strategy<Value = RuleOrder>
{
    prop_oneof![
        Just(RuleOrder::HolidayShiftFirst),
        Just(RuleOrder::EasterDeferralFirst)
    ]
}

fn planner(buffer_policy: BufferPolicy, rule_order: RuleOrder) -> ExamPeriodPlanner
{
    let mut planner_configuration = PlannerConfiguration::default();
    planner_configuration.constraints.buffer_policy = buffer_policy;
    planner_configuration.rules.rule_order = rule_order;
    planner_configuration.search.maximum_optimization_attempts = 2;
    ExamPeriodPlanner::from_configuration(&planner_configuration)
}

proptest! {
    #[test]
    fn test_exam_weeks_have_five_days_or_are_degraded(
        semester_input in semester_input_strategy(),
        rule_order in rule_order_strategy(),
    ) {
        let semester_plans = planner(BufferPolicy::Minimum, rule_order)
            .plan_semester(&semester_input)
            .unwrap();

        for plan in &semester_plans.plans {
            for exam_week in &plan.exam_weeks {
                let degraded = exam_week
                    .annotations
                    .iter()
                    .any(|annotation| matches!(annotation, Annotation::Degraded { .. }));
                prop_assert!(exam_week.exam_days.len() == EXAM_DAYS_PER_WEEK || degraded);
            }
        }
    }

    #[test]
    fn test_exam_weeks_do_not_overlap(
        semester_input in semester_input_strategy(),
        rule_order in rule_order_strategy(),
    ) {
        let semester_plans = planner(BufferPolicy::Minimum, rule_order)
            .plan_semester(&semester_input)
            .unwrap();

        for plan in &semester_plans.plans {
            prop_assert!(!plan.has_overlapping_exam_weeks());
            for pair in plan.exam_weeks.windows(2) {
                prop_assert!(pair[0].last_day() < pair[1].first_day());
            }
        }
    }

    #[test]
    fn test_winter_first_block_is_consecutive(semester_input in semester_input_strategy()) {
        let semester_plans = planner(BufferPolicy::Minimum, RuleOrder::HolidayShiftFirst)
            .plan_semester(&semester_input)
            .unwrap();

        for plan in &semester_plans.plans {
            if let (Some(p1a), Some(p1b)) =
                (plan.exam_week(ExamWeekTag::P1a), plan.exam_week(ExamWeekTag::P1b))
            {
                prop_assert_eq!(p1a.nominal_week + TimeDelta::weeks(1), p1b.nominal_week);
            }
            prop_assert_eq!(
                plan.exam_weeks.len(),
                semester_input.semester.kind().number_of_first_block_weeks() + 2
            );
        }
    }

    #[test]
    fn test_planning_is_idempotent(semester_input in semester_input_strategy()) {
        let planner = planner(BufferPolicy::Minimum, RuleOrder::HolidayShiftFirst);

        let first = planner.plan_semester(&semester_input).unwrap();
        let second = planner.plan_semester(&semester_input).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_exact_policy_buffers(semester_input in semester_input_strategy()) {
        let semester_plans = planner(BufferPolicy::Exact, RuleOrder::HolidayShiftFirst)
            .plan_semester(&semester_input)
            .unwrap();

        for plan in &semester_plans.plans {
            let flags_before = plan
                .violations
                .iter()
                .any(|violation| matches!(violation.constraint, Constraint::BufferBeforeHip { .. }));
            let flags_after = plan
                .violations
                .iter()
                .any(|violation| matches!(violation.constraint, Constraint::BufferAfterHip { .. }));

            prop_assert_eq!(!flags_before, plan.statistics.weeks_before_hip == 7);
            prop_assert_eq!(!flags_after, plan.statistics.weeks_after_hip == 7);
        }
    }

    #[test]
    fn test_alternatives_only_without_a_valid_plan(semester_input in semester_input_strategy()) {
        let semester_plans = planner(BufferPolicy::Minimum, RuleOrder::HolidayShiftFirst)
            .plan_semester(&semester_input)
            .unwrap();

        if semester_plans.has_alternatives() {
            prop_assert!(semester_plans.plans.iter().all(|plan| !plan.is_valid()));
            for (index, plan) in semester_plans.plans.iter().enumerate() {
                for other in &semester_plans.plans[index + 1..] {
                    prop_assert_ne!(&plan.violations, &other.violations);
                }
            }
        } else {
            prop_assert_eq!(semester_plans.plans.len(), 1);
        }
    }
}
