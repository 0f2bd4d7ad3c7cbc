// src/models/lesson.rs

use serde::Serialize;

/// A card of the learn screen.
#[derive(Debug, Serialize)]
pub struct LessonSection {
    pub title: &'static str,
    /// Colour accent used by the front-end ("blue", "indigo", "purple", "orange").
    pub accent: &'static str,
    pub points: &'static [LessonPoint],
}

#[derive(Debug, Serialize)]
pub struct LessonPoint {
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
}

const fn point(text: &'static str, example: Option<&'static str>) -> LessonPoint {
    LessonPoint { text, example }
}

pub static LESSONS: &[LessonSection] = &[
    LessonSection {
        title: "1. 동명사(Gerund)란?",
        accent: "blue",
        points: &[
            point(
                "동명사는 동사원형 + -ing 형태로, 동사의 성질을 가지고 있지만 문장에서는 명사처럼 쓰입니다.",
                None,
            ),
            point(
                "해석은 '~하는 것', '~하기'로 합니다.",
                Some("I like swimming. (나는 수영하는 것을 좋아한다.)"),
            ),
        ],
    },
    LessonSection {
        title: "2. 동명사의 역할",
        accent: "indigo",
        points: &[
            point(
                "주어(Subject): 문장의 맨 앞에 옴. (단수 취급)",
                Some("Running is fun. (달리는 것은 재미있다.)"),
            ),
            point(
                "목적어(Object): 일반동사 뒤에 옴.",
                Some("I enjoy reading. (나는 독서하는 것을 즐긴다.)"),
            ),
            point(
                "보어(Complement): be동사 뒤에 와서 주어를 설명.",
                Some("My hobby is drawing. (내 취미는 그림 그리기이다.)"),
            ),
        ],
    },
    LessonSection {
        title: "3. 동명사 vs 투부정사 목적어",
        accent: "purple",
        points: &[
            point(
                "동명사만 쓰는 동사 (-ing): enjoy, finish, mind, avoid, give up, keep, practice, suggest",
                Some("Tip: 과거지향적, 중단, 부정적 뉘앙스가 많아요."),
            ),
            point(
                "투부정사만 쓰는 동사 (to-v): want, hope, wish, expect, plan, decide, promise",
                Some("Tip: 미래지향적, 희망, 계획의 뉘앙스가 많아요."),
            ),
            point("remember/forget + ing: 과거의 일을 기억/망각", None),
            point("remember/forget + to-v: (미래에) 할 일을 기억/망각", None),
            point("stop + ing: ~하는 것을 멈추다", None),
            point("stop + to-v: ~하기 위해 멈추다", None),
            point("try + ing: 시험 삼아 해보다", None),
            point("try + to-v: ~하려고 노력하다", None),
        ],
    },
    LessonSection {
        title: "4. 동명사의 관용 표현",
        accent: "orange",
        points: &[
            point("go ~ing (~하러 가다)", None),
            point("be busy ~ing (~하느라 바쁘다)", None),
            point("look forward to ~ing (~를 고대하다)", None),
            point("cannot help ~ing (~하지 않을 수 없다)", None),
            point("spend 시간/돈 ~ing (~하는 데 쓰다)", None),
            point("It is no use ~ing (~해도 소용없다)", None),
        ],
    },
];
